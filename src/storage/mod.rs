//! Storage layer for fintrack-core
//!
//! All four collections live in memory behind per-collection repositories
//! and are persisted together as one JSON document written atomically. A
//! multi-collection mutation therefore commits as a single durable unit: the
//! document is either fully replaced or left untouched.

pub mod accounts;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod settings;
pub mod transactions;

pub use accounts::AccountRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::seed_default_categories;
pub use settings::SettingsRepository;
pub use transactions::TransactionRepository;

use serde::{Deserialize, Serialize};

use crate::config::paths::FintrackPaths;
use crate::error::LedgerError;
use crate::models::{Account, Category, Setting, Transaction};

/// Current on-disk document version
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// The single on-disk document holding all four collections
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerDocument {
    #[serde(default = "default_schema_version")]
    schema_version: u32,
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    settings: Vec<Setting>,
}

impl Default for LedgerDocument {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            accounts: Vec::new(),
            transactions: Vec::new(),
            categories: Vec::new(),
            settings: Vec::new(),
        }
    }
}

/// Main storage coordinator providing access to all repositories
pub struct Store {
    paths: FintrackPaths,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub settings: SettingsRepository,
}

impl Store {
    /// Open a store at the given paths, loading any existing document
    pub fn open(paths: FintrackPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        let store = Self {
            accounts: AccountRepository::new(),
            transactions: TransactionRepository::new(),
            categories: CategoryRepository::new(),
            settings: SettingsRepository::new(),
            paths,
        };
        store.load()?;
        Ok(store)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    /// Load the document from disk, replacing all in-memory collections
    ///
    /// A missing file yields an empty document.
    pub fn load(&self) -> Result<(), LedgerError> {
        let document: LedgerDocument = read_json(self.paths.ledger_file())?;

        if document.schema_version > SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "Unsupported schema version: {} (newest known is {})",
                document.schema_version, SCHEMA_VERSION
            )));
        }

        self.accounts.replace_all(document.accounts)?;
        self.transactions.replace_all(document.transactions)?;
        self.categories.replace_all(document.categories)?;
        self.settings.replace_all(document.settings)?;
        Ok(())
    }

    /// Commit all four collections to disk as one atomic document
    ///
    /// If the write fails, the in-memory state is reloaded from the durable
    /// document so the store never serves state that is ahead of disk.
    pub fn commit(&self) -> Result<(), LedgerError> {
        let document = LedgerDocument {
            schema_version: SCHEMA_VERSION,
            accounts: self.accounts.get_all()?,
            transactions: self.transactions.get_all()?,
            categories: self.categories.get_all()?,
            settings: self.settings.get_all()?,
        };

        if let Err(err) = write_json_atomic(self.paths.ledger_file(), &document) {
            // Roll memory back to the last durable state
            let _ = self.load();
            return Err(err);
        }

        Ok(())
    }

    /// Replace every collection in memory (the restore path); callers must
    /// follow with `commit` to make the replacement durable
    pub fn replace_all(
        &self,
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        settings: Vec<Setting>,
    ) -> Result<(), LedgerError> {
        self.accounts.replace_all(accounts)?;
        self.transactions.replace_all(transactions)?;
        self.categories.replace_all(categories)?;
        self.settings.replace_all(settings)?;
        Ok(())
    }
}
