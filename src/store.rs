//! The ledger store: exclusive owner of the transaction collection.
//!
//! The store holds the authoritative in-memory list of transactions and the
//! path of the data file it was loaded from. Every mutation persists the full
//! collection as one atomic JSON write. Callers receive read-only views and
//! never mutate the list directly.

use crate::model::Transaction;
use crate::{fs, Result};
use anyhow::Context;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Owns the transaction collection and its persistence.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl Store {
    /// Loads the store from the data file at `path`.
    ///
    /// A missing or unreadable file degrades to an empty collection rather
    /// than an error: losing an unreadable local cache is recoverable, and
    /// the next persist will replace it. Malformed data is logged at `warn!`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let transactions = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<Transaction>>(&content) {
                Ok(transactions) => transactions,
                Err(e) => {
                    warn!(
                        "The data file at {} is malformed and will be ignored: {e}",
                        path.display()
                    );
                    Vec::new()
                }
            },
            Err(_) => {
                debug!(
                    "No data file at {}, starting with an empty ledger",
                    path.display()
                );
                Vec::new()
            }
        };
        Self { path, transactions }
    }

    /// The path of the data file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A read-only snapshot of the collection in insertion order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Generates an id, appends the transaction and persists the collection.
    /// Returns the stored transaction with its new id.
    ///
    /// The caller is responsible for validating the draft's fields first,
    /// see [`Transaction::validate`].
    pub fn add(&mut self, mut tx: Transaction) -> Result<&Transaction> {
        let mut id = generate_id();
        while self.transactions.iter().any(|t| t.id() == id) {
            id = generate_id();
        }
        tx.id = id;
        self.transactions.push(tx);
        self.persist()?;
        Ok(self
            .transactions
            .last()
            .context("The transaction that was just added is missing")?)
    }

    /// Replaces the entry whose id matches `tx.id` in place, preserving its
    /// position, then persists. Returns false without persisting when no
    /// entry matches; a missing id is not an error.
    pub fn update(&mut self, tx: Transaction) -> Result<bool> {
        match self.transactions.iter_mut().find(|t| t.id() == tx.id()) {
            Some(existing) => {
                *existing = tx;
                self.persist()?;
                Ok(true)
            }
            None => {
                debug!("No transaction with id '{}', nothing to update", tx.id());
                Ok(false)
            }
        }
    }

    /// Removes the entry with the matching id if present; a missing id is a
    /// no-op. Persists afterward regardless.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id() != id);
        let removed = self.transactions.len() < before;
        if !removed {
            debug!("No transaction with id '{id}', nothing to delete");
        }
        self.persist()?;
        Ok(removed)
    }

    /// Wholesale replacement of the collection (the bulk-import path), then
    /// persists.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<()> {
        self.transactions = transactions;
        self.persist()
    }

    /// Serializes the full collection to the data file as one atomic write,
    /// overwriting any previous value.
    ///
    /// Write failures propagate to the caller so the UI can warn the user;
    /// silently dropping them would risk unnoticed data loss.
    pub fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.transactions)
            .context("Failed to serialize the ledger to JSON")?;
        fs::write(&self.path, json)
    }
}

/// Generates a transaction id from a millisecond timestamp component and a
/// random component. Uniqueness is only needed within one store's lifetime,
/// so collisions are vanishingly unlikely (and `Store::add` re-checks).
fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let rand = Uuid::new_v4().simple().to_string();
    format!("{millis:x}-{}", &rand[..8])
}
