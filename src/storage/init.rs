//! Storage initialization
//!
//! Seeds the default category set on first run.

use crate::error::LedgerError;
use crate::models::{Category, CategoryKind};

use super::categories::CategoryRepository;

const DEFAULT_INCOME: &[&str] = &["Salary", "Freelance", "Business", "Investment", "Other"];

const DEFAULT_EXPENSE: &[&str] = &[
    "Food",
    "Transport",
    "Bills",
    "Shopping",
    "Health",
    "Entertainment",
    "Education",
    "Other",
];

/// Seed the default categories when the collection is empty
///
/// Returns true when seeding happened; an already-populated collection is
/// left untouched so user edits survive restarts.
pub fn seed_default_categories(categories: &CategoryRepository) -> Result<bool, LedgerError> {
    if categories.count()? > 0 {
        return Ok(false);
    }

    for name in DEFAULT_INCOME {
        categories.upsert(Category::new_default(CategoryKind::Income, *name))?;
    }
    for name in DEFAULT_EXPENSE {
        categories.upsert(Category::new_default(CategoryKind::Expense, *name))?;
    }

    Ok(true)
}
