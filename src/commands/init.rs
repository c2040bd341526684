//! Init command handler.

use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the moneybook home directory, the backups subdirectory and an
/// initial `config.json`.
pub fn init(home: &Path, args: InitArgs) -> Result<Out<String>> {
    let config = Config::create(home, args.currency())?;
    let message = format!(
        "Initialized moneybook home at {}",
        config.root().display()
    );
    Ok(Out::new(message, config.root().display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_home() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("moneybook");

        let out = init(&home, InitArgs::new(None)).unwrap();
        assert!(out.message().contains("Initialized moneybook home"));

        // The home can be loaded afterward
        let config = Config::load(&home).unwrap();
        assert!(config.backups().is_dir());
    }

    #[test]
    fn test_init_with_currency() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("moneybook");
        init(&home, InitArgs::new(Some("₹".to_string()))).unwrap();

        let config = Config::load(&home).unwrap();
        assert_eq!(config.currency_symbol(), "₹");
    }
}
