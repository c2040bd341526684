//! Summary and report command handlers.

use crate::args::{GroupBy, ReportArgs};
use crate::commands::Out;
use crate::model::Amount;
use crate::report::{self, Totals};
use crate::store::Store;
use crate::{Config, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Prints income, expense and balance totals over the whole ledger.
pub fn summary(config: &Config) -> Result<Out<Totals>> {
    let store = Store::load(config.data_path());
    let totals = report::totals(store.all());

    let symbol = config.currency_symbol();
    let message = format!(
        "Income:  {}\nExpense: {}\nBalance: {}",
        Amount::new(totals.income()).formatted(symbol),
        Amount::new(totals.expense()).formatted(symbol),
        Amount::new(totals.balance()).formatted(symbol),
    );
    Ok(Out::new(message, totals))
}

/// Prints a grouped series: expense totals by category, or spending totals
/// by month. These are the series behind the original dashboard's pie and
/// bar charts.
pub fn report(config: &Config, args: ReportArgs) -> Result<Out<BTreeMap<String, Decimal>>> {
    let store = Store::load(config.data_path());
    let groups = match args.group() {
        GroupBy::Category => report::by_category(store.all()),
        GroupBy::Month => report::by_month(store.all()),
    };

    let message = if groups.is_empty() {
        format!("No {} data to report", args.group())
    } else {
        let symbol = config.currency_symbol();
        groups
            .iter()
            .map(|(key, total)| format!("{key}: {}", Amount::new(*total).formatted(symbol)))
            .collect::<Vec<String>>()
            .join("\n")
    };
    Ok(Out::new(message, groups))
}
