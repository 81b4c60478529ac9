//! Portable snapshot format
//!
//! A snapshot captures all four collections verbatim, derived balances
//! included (redundant on restore, kept for forward compatibility). Decoding
//! is lenient: missing collections default to empty; only an unparseable top
//! level or an unknown future version is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, Category, Setting, Transaction};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// A complete point-in-time serialization of the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,

    /// When the snapshot was taken
    #[serde(default = "Utc::now")]
    pub exported_at: DateTime<Utc>,

    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub settings: Vec<Setting>,
}

impl Snapshot {
    /// Capture a snapshot of the given collections, stamped now
    pub fn capture(
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        settings: Vec<Setting>,
    ) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            exported_at: Utc::now(),
            accounts,
            transactions,
            categories,
            settings,
        }
    }

    /// Serialize to the plaintext backup format (pretty-printed UTF-8 JSON)
    pub fn to_json(&self) -> LedgerResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Format(format!("Failed to serialize snapshot: {}", e)))
    }

    /// Parse a snapshot from backup JSON
    ///
    /// Fails with `Format` when the top-level structure does not parse or
    /// carries a version newer than this build understands.
    pub fn from_json(text: &str) -> LedgerResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(text)
            .map_err(|e| LedgerError::Format(format!("Invalid backup file: {}", e)))?;

        if snapshot.version > SNAPSHOT_VERSION {
            return Err(LedgerError::Format(format!(
                "Unsupported backup version: {} (newest known is {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }

        Ok(snapshot)
    }

    /// Short description of the snapshot's contents
    pub fn summary(&self) -> String {
        format!(
            "{} accounts, {} transactions, {} categories, {} settings",
            self.accounts.len(),
            self.transactions.len(),
            self.categories.len(),
            self.settings.len()
        )
    }
}
