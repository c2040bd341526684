//! Configuration file handling for moneybook.
//!
//! The configuration file is stored at `$MONEYBOOK_HOME/config.json` and
//! contains settings for the application including the display currency
//! symbol and backup settings. The transaction data file and the backups
//! directory live alongside it in the moneybook home directory.

use crate::backup::Backup;
use crate::{fs, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "moneybook";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const CURRENCY_SYMBOL: &str = "$";
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const TRANSACTIONS_JSON: &str = "transactions.json";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$MONEYBOOK_HOME` and from there
/// it loads `$MONEYBOOK_HOME/config.json`. It provides paths to the other
/// items expected in the moneybook home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    data_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and its subdirectories, and writes an
    /// initial `config.json` with default settings.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory,
    ///   e.g. `$HOME/moneybook`
    /// - `currency_symbol` - An optional display currency symbol; defaults
    ///   to `$` when not given.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub fn create(dir: impl Into<PathBuf>, currency_symbol: Option<&str>) -> Result<Self> {
        // Create the directory if it does not exist
        let maybe_relative = dir.into();
        fs::make_dir(&maybe_relative).context("Unable to create the moneybook home directory")?;

        // Canonicalize the directory path
        let root = fs::canonicalize(&maybe_relative)?;

        // Create the backups subdirectory
        let backups_dir = root.join(BACKUPS);
        fs::make_dir(&backups_dir)?;

        // Create and save an initial ConfigFile in the datastore
        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backup_copies: BACKUP_COPIES,
            currency_symbol: currency_symbol.unwrap_or(CURRENCY_SYMBOL).to_string(),
        };
        config_file.save(&config_path)?;

        Ok(Self {
            root: root.clone(),
            backups: backups_dir,
            config_path,
            data_path: root.join(TRANSACTIONS_JSON),
            config_file,
        })
    }

    /// This will
    /// - validate that the moneybook home exists and that the config file exists
    /// - load the config file
    /// - validate that the backups directory exists
    /// - return the loaded configuration object
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = fs::canonicalize(&maybe_relative)
            .context("Moneybook home is missing, run 'moneybook init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path)?;

        let config = Self {
            root: root.clone(),
            backups: root.join(BACKUPS),
            config_path,
            data_path: root.join(TRANSACTIONS_JSON),
            config_file,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The path of the transaction data file (the persistence slot).
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// The symbol used when formatting amounts for display.
    pub fn currency_symbol(&self) -> &str {
        &self.config_file.currency_symbol
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }
}

/// Represents the serialization and deserialization format of the
/// configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "moneybook",
///   "config_version": 1,
///   "backup_copies": 5,
///   "currency_symbol": "$"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "moneybook"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Number of backup copies to keep
    backup_copies: u32,

    /// Symbol used when formatting amounts for display
    #[serde(default = "default_currency_symbol")]
    currency_symbol: String,
}

fn default_currency_symbol() -> String {
    CURRENCY_SYMBOL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backup_copies: BACKUP_COPIES,
            currency_symbol: CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: ConfigFile = fs::deserialize(path)?;

        // Validate app_name
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        fs::write(path, data).context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("moneybook_home");

        let config = Config::create(&home_dir, None).unwrap();

        assert!(config.backups().is_dir());
        assert!(config.config_path().is_file());
        assert_eq!(config.currency_symbol(), "$");
        assert_eq!(config.backup_copies(), 5);
        assert_eq!(
            config.data_path().file_name().unwrap(),
            "transactions.json"
        );
    }

    #[test]
    fn test_config_create_with_currency() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path().join("home"), Some("₹")).unwrap();
        assert_eq!(config.currency_symbol(), "₹");
    }

    #[test]
    fn test_config_create_then_load() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("home");
        let created = Config::create(&home_dir, Some("€")).unwrap();

        let loaded = Config::load(&home_dir).unwrap();
        assert_eq!(created.root(), loaded.root());
        assert_eq!(loaded.currency_symbol(), "€");
    }

    #[test]
    fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope"));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        // The directory exists but was never initialized
        let result = Config::load(dir.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("config file is missing"));
    }

    #[test]
    fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1,
            "backup_copies": 5
        }"#;
        std::fs::write(&config_path, json).unwrap();

        let result = ConfigFile::load(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_file_load_without_currency_defaults() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        let json = r#"{
            "app_name": "moneybook",
            "config_version": 1,
            "backup_copies": 3
        }"#;
        std::fs::write(&config_path, json).unwrap();

        let config = ConfigFile::load(&config_path).unwrap();
        assert_eq!(config.backup_copies, 3);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_config_file_save_and_load() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        let original = ConfigFile {
            currency_symbol: "£".to_string(),
            backup_copies: 7,
            ..ConfigFile::default()
        };
        original.save(&config_path).unwrap();

        let loaded = ConfigFile::load(&config_path).unwrap();
        assert_eq!(original, loaded);
    }
}
