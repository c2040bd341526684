use crate::model::Amount;
use crate::Result;
use anyhow::{ensure, Context};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The format a `date` field must conform to, e.g. `2024-03-15`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a transaction adds to or subtracts from the balance.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TxKind);
serde_plain::derive_fromstr_from_deserialize!(TxKind);

/// A single income or expense record.
///
/// The serialized field names match the ledger document format: a JSON array
/// of records with fields `id, type, amount, category, date, notes`. The
/// `notes` field may be absent in documents written by other tools, so it
/// defaults to empty.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque unique identifier, assigned by the store at creation.
    #[serde(default)]
    pub(crate) id: String,
    #[serde(rename = "type")]
    pub(crate) kind: TxKind,
    pub(crate) amount: Amount,
    pub(crate) category: String,
    /// Calendar date as a `YYYY-MM-DD` string. Kept as a string so the
    /// `YYYY-MM` month key is a lexical slice of the first 7 characters.
    pub(crate) date: String,
    #[serde(default)]
    pub(crate) notes: String,
}

impl Transaction {
    /// Creates a draft transaction with no `id`. The store assigns an id
    /// when the draft is added.
    pub fn new(
        kind: TxKind,
        amount: Amount,
        category: impl Into<String>,
        date: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            kind,
            amount,
            category: category.into(),
            date: date.into(),
            notes: notes.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> TxKind {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// The `YYYY-MM` month key, i.e. the first 7 characters of `date`.
    pub fn month_key(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }

    /// Checks the field-presence preconditions: a non-negative amount, a
    /// non-empty category and a parseable `YYYY-MM-DD` date.
    ///
    /// Callers are expected to validate input before handing a transaction
    /// to the store; the store itself does not re-validate.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.amount.is_negative(),
            "The amount must not be negative, got '{}'",
            self.amount
        );
        ensure!(!self.category.trim().is_empty(), "A category is required");
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", self.date))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn draft(date: &str) -> Transaction {
        Transaction::new(
            TxKind::Expense,
            Amount::from_str("4.50").unwrap(),
            "Food",
            date,
            "",
        )
    }

    #[test]
    fn test_month_key() {
        assert_eq!(draft("2024-03-15").month_key(), "2024-03");
        assert_eq!(draft("2024-12-01").month_key(), "2024-12");
    }

    #[test]
    fn test_month_key_short_date() {
        // A malformed short date yields the whole string rather than panicking
        assert_eq!(draft("2024").month_key(), "2024");
    }

    #[test]
    fn test_validate_ok() {
        assert!(draft("2024-03-15").validate().is_ok());
    }

    #[test]
    fn test_validate_bad_date() {
        assert!(draft("03/15/2024").validate().is_err());
        assert!(draft("2024-13-01").validate().is_err());
        assert!(draft("").validate().is_err());
    }

    #[test]
    fn test_validate_empty_category() {
        let mut tx = draft("2024-03-15");
        tx.category = "  ".to_string();
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_validate_negative_amount() {
        let mut tx = draft("2024-03-15");
        tx.amount = Amount::from_str("-1.00").unwrap();
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(TxKind::Income.to_string(), "income");
        assert_eq!(TxKind::Expense.to_string(), "expense");
        assert_eq!(TxKind::from_str("income").unwrap(), TxKind::Income);
    }

    #[test]
    fn test_serde_document_shape() {
        let json = r#"{
            "id": "abc123",
            "type": "expense",
            "amount": 500,
            "category": "Food",
            "date": "2024-03-15"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id(), "abc123");
        assert_eq!(tx.kind(), TxKind::Expense);
        assert_eq!(tx.category(), "Food");
        assert_eq!(tx.notes(), "");

        let back = serde_json::to_value(&tx).unwrap();
        assert_eq!(back["type"], "expense");
        assert_eq!(back["amount"], "500");
    }
}
