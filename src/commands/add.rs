//! Add command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::store::Store;
use crate::{Config, Result};

/// Records a new transaction in the ledger.
///
/// A unique transaction id is generated by the store. The generated id is
/// returned on success.
///
/// # Errors
///
/// - Returns an error if the field preconditions fail (negative amount,
///   empty category, malformed date).
/// - Returns an error if the data file cannot be written.
pub fn add(config: &Config, args: AddArgs) -> Result<Out<String>> {
    let fields = args.fields();
    let draft = Transaction::new(
        fields.kind(),
        fields.amount(),
        fields.category(),
        fields.date(),
        fields.notes().unwrap_or_default(),
    );
    draft.validate()?;

    let mut store = Store::load(config.data_path());
    let stored = store.add(draft)?;

    let message = format!(
        "Added {} of {} with ID: {}",
        stored.kind(),
        stored.amount().formatted(config.currency_symbol()),
        stored.id()
    );
    let id = stored.id().to_string();
    Ok(Out::new(message, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::FieldArgs;
    use crate::model::{Amount, TxKind};
    use crate::test::TestEnv;
    use std::str::FromStr;

    fn field_args(amount: &str, category: &str, date: &str) -> AddArgs {
        AddArgs::new(FieldArgs::new(
            TxKind::Expense,
            Amount::from_str(amount).unwrap(),
            category,
            date,
            Some("test note".to_string()),
        ))
    }

    #[test]
    fn test_add_success() {
        let env = TestEnv::new();
        let out = add(&env.config(), field_args("12.50", "Food", "2025-01-20")).unwrap();

        assert!(out.message().contains("Added expense of $12.50"));
        let id = out.structure().unwrap();
        assert!(!id.is_empty());

        // The transaction was persisted
        let store = env.store();
        assert_eq!(store.all().len(), 1);
        assert_eq!(store.all()[0].id(), id);
        assert_eq!(store.all()[0].notes(), "test note");
    }

    #[test]
    fn test_add_rejects_bad_date() {
        let env = TestEnv::new();
        let result = add(&env.config(), field_args("12.50", "Food", "01/20/2025"));
        assert!(result.is_err());
        assert!(env.store().all().is_empty());
    }

    #[test]
    fn test_add_rejects_empty_category() {
        let env = TestEnv::new();
        let result = add(&env.config(), field_args("12.50", " ", "2025-01-20"));
        assert!(result.is_err());
    }

    #[test]
    fn test_add_rejects_negative_amount() {
        let env = TestEnv::new();
        let result = add(&env.config(), field_args("-5", "Food", "2025-01-20"));
        assert!(result.is_err());
    }
}
