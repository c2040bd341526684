//! List command handler.

use crate::args::{ListArgs, ListFormat};
use crate::commands::{port, Out};
use crate::model::Transaction;
use crate::store::Store;
use crate::{Config, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The ledger contents in the requested output format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rows {
    /// JSON array of transaction records.
    Json(serde_json::Value),
    /// Markdown table as a single formatted string.
    Table(String),
    /// CSV data as a properly escaped string.
    Csv(String),
}

impl Debug for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => write!(f, "Rows::Json({:?})", v),
            Rows::Table(s) => write!(f, "Rows::Table({} chars)", s.len()),
            Rows::Csv(s) => write!(f, "Rows::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Rows::Table(s) => write!(f, "{}", s),
            Rows::Csv(s) => write!(f, "{}", s),
        }
    }
}

/// Lists all transactions in insertion order.
///
/// The table format is for human eyes and formats amounts with the
/// configured currency symbol; json and csv carry the raw values.
pub fn list(config: &Config, args: ListArgs) -> Result<Out<Rows>> {
    let store = Store::load(config.data_path());
    let transactions = store.all();

    let rows = match args.format() {
        ListFormat::Json => Rows::Json(
            serde_json::to_value(transactions)
                .context("Failed to serialize the ledger to JSON")?,
        ),
        ListFormat::Table => Rows::Table(render_table(
            transactions,
            config.currency_symbol(),
        )),
        ListFormat::Csv => Rows::Csv(port::csv_document(transactions)?),
    };

    let count = transactions.len();
    let message = if count == 0 {
        "The ledger is empty".to_string()
    } else {
        format!(
            "{} transaction{}\n{}",
            count,
            if count == 1 { "" } else { "s" },
            rows
        )
    };
    Ok(Out::new(message, rows))
}

/// Renders the transactions as a markdown table with padded columns.
fn render_table(transactions: &[Transaction], symbol: &str) -> String {
    let header = ["ID", "Type", "Amount", "Category", "Date", "Notes"];
    let rows: Vec<[String; 6]> = transactions
        .iter()
        .map(|tx| {
            [
                tx.id().to_string(),
                tx.kind().to_string(),
                tx.amount().formatted(symbol),
                tx.category().to_string(),
                tx.date().to_string(),
                tx.notes().to_string(),
            ]
        })
        .collect();

    // Column widths from the widest cell, header included
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ix, cell) in row.iter().enumerate() {
            widths[ix] = widths[ix].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let format_row = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(ix, cell)| format!("{:width$}", cell, width = widths[ix]))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let header_cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    out.push_str(&format_row(&header_cells));
    out.push('\n');
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("|-{}-|", separator.join("-|-")));
    for row in &rows {
        out.push('\n');
        out.push_str(&format_row(row));
    }
    out
}
