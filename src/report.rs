//! Derived views over the ledger: summary totals and grouped series.
//!
//! Everything in this module is a pure function of the transaction slice it
//! is given; nothing here mutates the store or formats for display. Display
//! rounding belongs to the caller, amounts are summed exactly.

use crate::model::{Transaction, TxKind};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary totals over the whole ledger.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Totals {
    income: Decimal,
    expense: Decimal,
    balance: Decimal,
}

impl Totals {
    pub fn income(&self) -> Decimal {
        self.income
    }

    pub fn expense(&self) -> Decimal {
        self.expense
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

/// Sums income and expense amounts; `balance = income - expense`. All zeros
/// on an empty slice.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for tx in transactions {
        match tx.kind() {
            TxKind::Income => income += tx.amount().value(),
            TxKind::Expense => expense += tx.amount().value(),
        }
    }
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Expense amounts grouped by category (the series behind the pie chart).
///
/// Categories with no expense entries are absent from the result rather than
/// present with a zero value.
pub fn by_category(transactions: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut groups = BTreeMap::new();
    for tx in transactions {
        if tx.kind() == TxKind::Expense {
            *groups
                .entry(tx.category().to_string())
                .or_insert(Decimal::ZERO) += tx.amount().value();
        }
    }
    groups
}

/// Expense amounts grouped by `YYYY-MM` month key (the series behind the bar
/// chart).
///
/// Every transaction contributes its month key to the result, but only
/// expense amounts are summed, so a month containing only income appears
/// with a total of zero. That quirk is kept intentionally: it determines
/// which months appear on the derived chart axis.
pub fn by_month(transactions: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut months = BTreeMap::new();
    for tx in transactions {
        let bucket = months
            .entry(tx.month_key().to_string())
            .or_insert(Decimal::ZERO);
        if tx.kind() == TxKind::Expense {
            *bucket += tx.amount().value();
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use std::str::FromStr;

    fn tx(kind: TxKind, amount: &str, category: &str, date: &str) -> Transaction {
        Transaction::new(kind, Amount::from_str(amount).unwrap(), category, date, "")
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_totals_empty() {
        let t = totals(&[]);
        assert_eq!(t.income(), Decimal::ZERO);
        assert_eq!(t.expense(), Decimal::ZERO);
        assert_eq!(t.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_balance_identity() {
        let txs = vec![
            tx(TxKind::Income, "100.25", "Salary", "2025-01-01"),
            tx(TxKind::Expense, "40.10", "Food", "2025-01-02"),
            tx(TxKind::Expense, "9.90", "Travel", "2025-01-03"),
            tx(TxKind::Income, "3.33", "Other", "2025-02-01"),
        ];
        let t = totals(&txs);
        assert_eq!(t.balance(), t.income() - t.expense());
        assert_eq!(t.income(), dec("103.58"));
        assert_eq!(t.expense(), dec("50.00"));
    }

    #[test]
    fn test_totals_order_independent() {
        let mut txs = vec![
            tx(TxKind::Income, "2000", "Salary", "2024-03-01"),
            tx(TxKind::Expense, "500", "Food", "2024-03-15"),
        ];
        let forward = totals(&txs);
        txs.reverse();
        assert_eq!(forward, totals(&txs));
    }

    #[test]
    fn test_by_category_ignores_income() {
        let txs = vec![
            tx(TxKind::Income, "2000", "Salary", "2024-03-01"),
            tx(TxKind::Expense, "500", "Food", "2024-03-15"),
            tx(TxKind::Expense, "250", "Food", "2024-04-01"),
            tx(TxKind::Expense, "10", "Travel", "2024-04-02"),
        ];
        let groups = by_category(&txs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["Food"], dec("750"));
        assert_eq!(groups["Travel"], dec("10"));
        // No zero-valued entry for the income-only category
        assert!(!groups.contains_key("Salary"));
    }

    #[test]
    fn test_by_month_buckets_expenses() {
        let txs = vec![
            tx(TxKind::Expense, "500", "Food", "2024-03-15"),
            tx(TxKind::Expense, "100", "Bills", "2024-03-20"),
            tx(TxKind::Expense, "75", "Travel", "2024-04-02"),
        ];
        let months = by_month(&txs);
        assert_eq!(months["2024-03"], dec("600"));
        assert_eq!(months["2024-04"], dec("75"));
    }

    #[test]
    fn test_by_month_income_only_month_is_zero_bucket() {
        // An income-only month still produces a bucket, with a total of zero
        let txs = vec![
            tx(TxKind::Income, "2000", "Salary", "2024-05-01"),
            tx(TxKind::Expense, "500", "Food", "2024-03-15"),
        ];
        let months = by_month(&txs);
        assert_eq!(months.len(), 2);
        assert_eq!(months["2024-05"], Decimal::ZERO);
        assert_eq!(months["2024-03"], dec("500"));
    }

    #[test]
    fn test_concrete_scenario() {
        let txs = vec![
            tx(TxKind::Expense, "500", "Food", "2024-03-15"),
            tx(TxKind::Income, "2000", "Salary", "2024-03-01"),
        ];
        let t = totals(&txs);
        assert_eq!(t.income(), dec("2000"));
        assert_eq!(t.expense(), dec("500"));
        assert_eq!(t.balance(), dec("1500"));

        let groups = by_category(&txs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["Food"], dec("500"));

        let months = by_month(&txs);
        assert_eq!(months.len(), 1);
        assert_eq!(months["2024-03"], dec("500"));
    }
}
