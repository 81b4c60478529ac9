//! Account repository
//!
//! In-memory account collection; durability is handled by the owning Store,
//! which commits all collections as one document.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Account, AccountId, Money};

/// Repository for accounts
#[derive(Default)]
pub struct AccountRepository {
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> Result<Option<Account>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all accounts, ordered by creation time then name
    pub fn get_all(&self) -> Result<Vec<Account>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(accounts)
    }

    /// Insert or update an account
    pub fn upsert(&self, account: Account) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(account.id, account);
        Ok(())
    }

    /// Overwrite the derived balance of an account, if present
    pub fn set_balance(&self, id: AccountId, balance: Money) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(account) = data.get_mut(&id) {
            account.balance = balance;
        }
        Ok(())
    }

    /// Delete an account, returning whether it existed
    pub fn delete(&self, id: AccountId) -> Result<bool, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Check if an account exists
    pub fn exists(&self, id: AccountId) -> Result<bool, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(&id))
    }

    /// Count accounts
    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    /// Replace the entire collection (bulk insert after clear)
    pub fn replace_all(&self, accounts: Vec<Account>) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for account in accounts {
            data.insert(account.id, account);
        }
        Ok(())
    }
}
