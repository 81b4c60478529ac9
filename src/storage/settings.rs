//! Settings repository
//!
//! Key/value records; durability is handled by the owning Store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::Setting;

/// Repository for settings
#[derive(Default)]
pub struct SettingsRepository {
    data: RwLock<BTreeMap<String, serde_json::Value>>,
}

impl SettingsRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a setting value by key
    pub fn get(&self, key: &str) -> Result<Option<serde_json::Value>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(key).cloned())
    }

    /// Set a setting value
    pub fn set(&self, key: impl Into<String>, value: serde_json::Value) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(key.into(), value);
        Ok(())
    }

    /// Remove a setting, returning whether it existed
    pub fn remove(&self, key: &str) -> Result<bool, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(key).is_some())
    }

    /// Check if a key is present
    pub fn contains(&self, key: &str) -> Result<bool, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.contains_key(key))
    }

    /// Get all settings as records, ordered by key
    pub fn get_all(&self) -> Result<Vec<Setting>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .iter()
            .map(|(key, value)| Setting::new(key.clone(), value.clone()))
            .collect())
    }

    /// Replace the entire collection (bulk insert after clear)
    ///
    /// Later records win on duplicate keys, matching bulk-insert into a
    /// unique-keyed table.
    pub fn replace_all(&self, settings: Vec<Setting>) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for setting in settings {
            data.insert(setting.key, setting.value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_get() {
        let repo = SettingsRepository::new();
        repo.set("pinHash", json!("abc")).unwrap();

        assert_eq!(repo.get("pinHash").unwrap(), Some(json!("abc")));
        assert_eq!(repo.get("missing").unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let repo = SettingsRepository::new();
        repo.set("pinHash", json!("abc")).unwrap();

        assert!(repo.remove("pinHash").unwrap());
        assert!(!repo.remove("pinHash").unwrap());
        assert!(!repo.contains("pinHash").unwrap());
    }

    #[test]
    fn test_get_all_ordered_by_key() {
        let repo = SettingsRepository::new();
        repo.set("zeta", json!(1)).unwrap();
        repo.set("alpha", json!(2)).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].key, "alpha");
        assert_eq!(all[1].key, "zeta");
    }

    #[test]
    fn test_replace_all_last_wins() {
        let repo = SettingsRepository::new();
        repo.set("old", json!(true)).unwrap();

        repo.replace_all(vec![
            Setting::new("budgets", json!([])),
            Setting::new("budgets", json!([1])),
        ])
        .unwrap();

        assert_eq!(repo.get("old").unwrap(), None);
        assert_eq!(repo.get("budgets").unwrap(), Some(json!([1])));
    }
}
