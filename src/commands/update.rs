//! Update command handler.

use crate::args::UpdateArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::store::Store;
use crate::{Config, Result};

/// Replaces an existing transaction's fields by id.
///
/// The replacement is whole-record: every field is taken from the arguments,
/// there are no partial patches. The entry keeps its position in the ledger.
/// An unknown id is not an error; the ledger is left unchanged and the
/// message says so.
pub fn update(config: &Config, args: UpdateArgs) -> Result<Out<String>> {
    let fields = args.fields();
    let mut replacement = Transaction::new(
        fields.kind(),
        fields.amount(),
        fields.category(),
        fields.date(),
        fields.notes().unwrap_or_default(),
    );
    replacement.validate()?;
    replacement.id = args.id().to_string();

    let mut store = Store::load(config.data_path());
    let message = if store.update(replacement)? {
        format!("Updated transaction {}", args.id())
    } else {
        format!("No transaction with ID: {}, nothing to update", args.id())
    };
    Ok(Out::new(message, args.id().to_string()))
}
