//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::store::Store;
use crate::{Config, Result};

/// Deletes one or more transactions by id.
///
/// Unknown ids are silently ignored; the returned structure lists the ids
/// that were actually removed. The collection persists after the call
/// regardless of whether anything matched.
pub fn delete(config: &Config, args: DeleteArgs) -> Result<Out<Vec<String>>> {
    let mut store = Store::load(config.data_path());

    let mut deleted = Vec::new();
    for id in args.ids() {
        if store.delete(id)? {
            deleted.push(id.clone());
        }
    }

    let count = deleted.len();
    let message = format!(
        "Deleted {} transaction{}",
        count,
        if count == 1 { "" } else { "s" }
    );
    Ok(Out::new(message, deleted))
}
