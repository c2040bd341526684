//! Backup management for local data file backups during destructive operations.

use crate::{fs, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::PathBuf;

/// Prefix for the safety backup written before a bulk import replaces the
/// ledger.
pub const IMPORT_PRE: &str = "import-pre";

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings
/// it needs. Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
    data_path: PathBuf,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
            data_path: config.data_path().to_path_buf(),
        }
    }

    /// Copies the transaction data file into the backups directory.
    ///
    /// The filename format is `{prefix}.YYYY-MM-DD-NNN.json` where NNN is a
    /// sequence number. Automatically rotates old backups, keeping only
    /// `backup_copies` files.
    ///
    /// Returns the path to the created backup file, or `None` when there is
    /// no data file yet (nothing to back up).
    pub fn save_data_file(&self, prefix: &str) -> Result<Option<PathBuf>> {
        if !self.data_path.is_file() {
            return Ok(None);
        }

        let date = today();
        let seq = self.next_sequence_number(prefix, &date)?;
        let filename = format!("{prefix}.{date}-{seq:03}.json");
        let path = self.backups_dir.join(&filename);

        fs::copy(&self.data_path, &path)?;

        self.rotate(prefix)?;

        Ok(Some(path))
    }

    /// Scans the backups directory for existing files with the given prefix
    /// and date, and returns the next sequence number.
    fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;

        for entry in std::fs::read_dir(&self.backups_dir)
            .with_context(|| format!("Failed to read {}", self.backups_dir.display()))?
        {
            let entry = entry.context("Failed to read directory entry")?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();

            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }

        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the
    /// given prefix.
    fn rotate(&self, prefix: &str) -> Result<()> {
        // Collect all matching backup files
        let mut files: Vec<(PathBuf, String)> = Vec::new();

        for entry in std::fs::read_dir(&self.backups_dir)
            .with_context(|| format!("Failed to read {}", self.backups_dir.display()))?
        {
            let entry = entry.context("Failed to read directory entry")?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy().to_string();

            if is_backup_file(&name, prefix) {
                files.push((entry.path(), name));
            }
        }

        // Sort by filename (which sorts by date and sequence number due to the format)
        files.sort_by(|a, b| a.1.cmp(&b.1));

        // Delete oldest files if we have more than backup_copies
        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, _) in files.into_iter().take(to_delete) {
            fs::remove(&path)?;
        }

        Ok(())
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    // Pattern: {prefix}.{date}-{NNN}.json
    let expected_start = format!("{prefix}.{date}-");
    let remainder = filename.strip_prefix(&expected_start)?;
    let seq_str = remainder.strip_suffix(".json")?;
    seq_str.parse().ok()
}

/// Checks if a filename is a backup file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(".json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_parse_sequence_number() {
        assert_eq!(
            parse_sequence_number("import-pre.2025-12-14-001.json", "import-pre", "2025-12-14"),
            Some(1)
        );
        assert_eq!(
            parse_sequence_number("import-pre.2025-12-14-042.json", "import-pre", "2025-12-14"),
            Some(42)
        );
        // Wrong prefix
        assert_eq!(
            parse_sequence_number("other.2025-12-14-001.json", "import-pre", "2025-12-14"),
            None
        );
        // Wrong date
        assert_eq!(
            parse_sequence_number("import-pre.2025-12-13-001.json", "import-pre", "2025-12-14"),
            None
        );
        // No extension
        assert_eq!(
            parse_sequence_number("import-pre.2025-12-14-001", "import-pre", "2025-12-14"),
            None
        );
    }

    #[test]
    fn test_is_backup_file() {
        assert!(is_backup_file("import-pre.2025-12-14-001.json", "import-pre"));
        assert!(!is_backup_file("import-pre.2025-12-14-001.json", "other"));
        assert!(!is_backup_file("import-pre.2025-12-14-001", "import-pre"));
    }

    #[test]
    fn test_save_data_file_missing_is_none() {
        let env = TestEnv::new();
        let backup = env.config().backup();
        // No data file has been written yet
        assert!(backup.save_data_file(IMPORT_PRE).unwrap().is_none());
    }

    #[test]
    fn test_save_data_file_and_rotate() {
        let env = TestEnv::new();
        let config = env.config();
        std::fs::write(config.data_path(), "[]").unwrap();

        let backup = config.backup();
        let mut last = PathBuf::new();
        // backup_copies defaults to 5; write a few more than that
        for _ in 0..8 {
            last = backup.save_data_file(IMPORT_PRE).unwrap().unwrap();
        }

        let count = std::fs::read_dir(config.backups()).unwrap().count();
        assert_eq!(count, 5);
        // The newest backup survives rotation
        assert!(last.is_file());
    }
}
