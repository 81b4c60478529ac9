//! Transaction repository
//!
//! In-memory transaction collection with foreign-key and date-ordered
//! queries; durability is handled by the owning Store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{AccountId, Transaction, TransactionId};

/// Repository for transactions
#[derive(Default)]
pub struct TransactionRepository {
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, ordered by date (oldest first)
    pub fn get_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        Ok(transactions)
    }

    /// Get all transactions for one account, ordered by date
    pub fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, LedgerError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.account_id == account_id)
            .collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, transaction: Transaction) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(transaction.id, transaction);
        Ok(())
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Delete every transaction referencing the given account, returning the
    /// number removed
    pub fn delete_by_account(&self, account_id: AccountId) -> Result<usize, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|_, t| t.account_id != account_id);
        Ok(before - data.len())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    /// Replace the entire collection (bulk insert after clear)
    pub fn replace_all(&self, transactions: Vec<Transaction>) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for transaction in transactions {
            data.insert(transaction.id, transaction);
        }
        Ok(())
    }
}
