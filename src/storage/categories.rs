//! Category repository
//!
//! In-memory category collection; durability is handled by the owning Store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Category, CategoryId};

/// Repository for categories
#[derive(Default)]
pub struct CategoryRepository {
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all categories, defaults first, then by kind and name
    pub fn get_all(&self) -> Result<Vec<Category>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then_with(|| a.kind.to_string().cmp(&b.kind.to_string()))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(categories)
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(category.id, category);
        Ok(())
    }

    /// Delete a category, returning whether it existed
    pub fn delete(&self, id: CategoryId) -> Result<bool, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    /// Replace the entire collection (bulk insert after clear)
    pub fn replace_all(&self, categories: Vec<Category>) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for category in categories {
            data.insert(category.id, category);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKind;

    #[test]
    fn test_upsert_and_get() {
        let repo = CategoryRepository::new();
        let cat = Category::new(CategoryKind::Expense, "Groceries");
        let id = cat.id;

        repo.upsert(cat).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Groceries");
    }

    #[test]
    fn test_defaults_sort_first() {
        let repo = CategoryRepository::new();
        repo.upsert(Category::new(CategoryKind::Expense, "Custom"))
            .unwrap();
        repo.upsert(Category::new_default(CategoryKind::Expense, "Food"))
            .unwrap();

        let all = repo.get_all().unwrap();
        assert!(all[0].is_default);
        assert_eq!(all[0].name, "Food");
    }

    #[test]
    fn test_delete() {
        let repo = CategoryRepository::new();
        let cat = Category::new(CategoryKind::Income, "Side Gig");
        let id = cat.id;

        repo.upsert(cat).unwrap();
        assert!(repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_replace_all() {
        let repo = CategoryRepository::new();
        repo.upsert(Category::new(CategoryKind::Income, "Old"))
            .unwrap();

        repo.replace_all(vec![
            Category::new(CategoryKind::Income, "A"),
            Category::new(CategoryKind::Expense, "B"),
        ])
        .unwrap();

        assert_eq!(repo.count().unwrap(), 2);
    }
}
