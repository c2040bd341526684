//! These structs provide the CLI interface for the moneybook CLI.

use crate::model::{Amount, TxKind};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// moneybook: a command-line personal finance ledger.
///
/// Records income and expense transactions in a local JSON data file and
/// derives summary totals and grouped reports (expenses by category, spending
/// by month) from them. Transactions can be exported as JSON or CSV and a
/// JSON backup can be imported back, wholesale-replacing the ledger.
///
/// All data lives in the moneybook home directory (--home or MONEYBOOK_HOME,
/// default ~/moneybook). Run `moneybook init` once to create it.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. Decide what directory you
    /// want to store data in and pass it as --home (or MONEYBOOK_HOME); by
    /// default it will be $HOME/moneybook.
    Init(InitArgs),
    /// Record a new transaction.
    Add(AddArgs),
    /// Replace an existing transaction's fields by id.
    Update(UpdateArgs),
    /// Delete one or more transactions by id.
    Delete(DeleteArgs),
    /// List all transactions in insertion order.
    List(ListArgs),
    /// Print income, expense and balance totals.
    Summary,
    /// Print a grouped report: expenses by category or spending by month.
    Report(ReportArgs),
    /// Replace the ledger with the contents of a JSON backup file.
    Import(ImportArgs),
    /// Write the ledger as a JSON or CSV document.
    Export(ExportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate
    /// for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where moneybook data and configuration is held.
    /// Defaults to ~/moneybook
    #[arg(long, env = "MONEYBOOK_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `moneybook init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The currency symbol used when formatting amounts for display,
    /// e.g. "$" or "₹". Display only, amounts are stored symbol-free.
    #[arg(long)]
    currency: Option<String>,
}

impl InitArgs {
    pub fn new(currency: Option<String>) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }
}

/// The transaction fields shared by `add` and `update`.
///
/// Suggested categories (free-form, not enforced): Food, Travel, Shopping,
/// Bills, Salary, Other.
#[derive(Debug, Parser, Clone)]
pub struct FieldArgs {
    /// Whether this is an income or an expense.
    #[arg(long = "type", value_enum)]
    kind: TxKind,

    /// The non-negative amount, e.g. "12.50". A leading currency symbol and
    /// thousands separators are tolerated.
    #[arg(long)]
    amount: Amount,

    /// The category label, e.g. "Food".
    #[arg(long)]
    category: String,

    /// The calendar date as YYYY-MM-DD, e.g. "2024-03-15".
    #[arg(long)]
    date: String,

    /// Optional free-form notes.
    #[arg(long)]
    notes: Option<String>,
}

impl FieldArgs {
    pub fn new(
        kind: TxKind,
        amount: Amount,
        category: impl Into<String>,
        date: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            date: date.into(),
            notes,
        }
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

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Args for the `moneybook add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[clap(flatten)]
    fields: FieldArgs,
}

impl AddArgs {
    pub fn new(fields: FieldArgs) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &FieldArgs {
        &self.fields
    }
}

/// Args for the `moneybook update` command. All fields are replaced; there
/// are no partial patches.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    /// The id of the transaction to replace.
    #[arg(long)]
    id: String,

    #[clap(flatten)]
    fields: FieldArgs,
}

impl UpdateArgs {
    pub fn new(id: impl Into<String>, fields: FieldArgs) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &FieldArgs {
        &self.fields
    }
}

/// Args for the `moneybook delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// One or more transaction ids to delete. Unknown ids are ignored.
    #[arg(required = true)]
    ids: Vec<String>,
}

impl DeleteArgs {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// The output format for the `list` command.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ListFormat {
    #[default]
    Table,
    Json,
    Csv,
}

serde_plain::derive_display_from_serialize!(ListFormat);
serde_plain::derive_fromstr_from_deserialize!(ListFormat);

/// Args for the `moneybook list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// The output format: table, json or csv.
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    format: ListFormat,
}

impl ListArgs {
    pub fn new(format: ListFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ListFormat {
        self.format
    }
}

/// The grouping axis for the `report` command.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Expense totals grouped by category.
    #[default]
    Category,
    /// Spending totals grouped by YYYY-MM month.
    Month,
}

serde_plain::derive_display_from_serialize!(GroupBy);
serde_plain::derive_fromstr_from_deserialize!(GroupBy);

/// Args for the `moneybook report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The axis to group by: "category" or "month".
    #[arg(value_enum)]
    group: GroupBy,
}

impl ReportArgs {
    pub fn new(group: GroupBy) -> Self {
        Self { group }
    }

    pub fn group(&self) -> GroupBy {
        self.group
    }
}

/// Args for the `moneybook import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    /// The JSON file to import. Must be an array of transaction records;
    /// anything else rejects the whole import with no changes.
    file: PathBuf,
}

impl ImportArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// The output format for the `export` command.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

serde_plain::derive_display_from_serialize!(ExportFormat);
serde_plain::derive_fromstr_from_deserialize!(ExportFormat);

/// Args for the `moneybook export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The output format: json or csv.
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(format: ExportFormat, out: Option<PathBuf>) -> Self {
        Self { format, out }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("moneybook"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or MONEYBOOK_HOME instead of relying on the default \
                moneybook home directory. If you continue using the program right now, you may \
                have problems!",
            );
            PathBuf::from("moneybook")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
