//! Import and export command handlers, and the document builders they share.

use crate::args::{ExportArgs, ExportFormat, ImportArgs};
use crate::backup::IMPORT_PRE;
use crate::commands::Out;
use crate::model::Transaction;
use crate::store::Store;
use crate::{fs, Config, Result};
use anyhow::Context;
use tracing::info;

/// Writes the ledger as a JSON or CSV document, to a file or to stdout.
pub fn export(config: &Config, args: ExportArgs) -> Result<Out<String>> {
    let store = Store::load(config.data_path());
    let transactions = store.all();

    let document = match args.format() {
        ExportFormat::Json => json_document(transactions)?,
        ExportFormat::Csv => csv_document(transactions)?,
    };

    let count = transactions.len();
    let message = match args.out() {
        Some(path) => {
            fs::write(path, &document)?;
            format!(
                "Exported {} transaction{} to {}",
                count,
                if count == 1 { "" } else { "s" },
                path.display()
            )
        }
        None => {
            // Without a target file the document itself is the output
            println!("{document}");
            format!(
                "Exported {} transaction{}",
                count,
                if count == 1 { "" } else { "s" }
            )
        }
    };
    Ok(Out::new(message, document))
}

/// Replaces the ledger with the contents of a JSON backup file.
///
/// The document must be a JSON array of transaction records; any other shape
/// (for example a JSON object) rejects the whole import with no partial
/// effect. The current data file is copied into the backups directory before
/// it is replaced.
pub fn import(config: &Config, args: ImportArgs) -> Result<Out<usize>> {
    let content = fs::read_to_string(args.file())?;
    let transactions: Vec<Transaction> = serde_json::from_str(&content).with_context(|| {
        format!(
            "{} is not an array of transaction records; the import was rejected and the \
            ledger is unchanged",
            args.file().display()
        )
    })?;

    // Safety copy of the current data file before the wholesale replacement
    if let Some(backup_path) = config.backup().save_data_file(IMPORT_PRE)? {
        info!("Backed up the current ledger to {}", backup_path.display());
    }

    let mut store = Store::load(config.data_path());
    store.replace_all(transactions)?;

    let count = store.all().len();
    let message = format!(
        "Imported {} transaction{}, replacing the previous ledger",
        count,
        if count == 1 { "" } else { "s" }
    );
    Ok(Out::new(message, count))
}

/// The structured export document: the same JSON array that the persistence
/// slot holds.
pub(crate) fn json_document(transactions: &[Transaction]) -> Result<String> {
    serde_json::to_string_pretty(transactions)
        .context("Failed to serialize the ledger to JSON")
}

/// The tabular export document: one header row
/// (`Type,Amount,Category,Date,Notes`) and one row per transaction. Fields
/// are quoted and escaped by the `csv` writer as needed.
pub(crate) fn csv_document(transactions: &[Transaction]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Type", "Amount", "Category", "Date", "Notes"])
        .context("Failed to write the CSV header")?;
    for tx in transactions {
        writer
            .write_record([
                tx.kind().to_string(),
                tx.amount().to_string(),
                tx.category().to_string(),
                tx.date().to_string(),
                tx.notes().to_string(),
            ])
            .context("Failed to write a CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .context("Failed to flush the CSV writer")?;
    String::from_utf8(bytes).context("The CSV document is not valid UTF-8")
}
