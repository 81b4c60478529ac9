//! Settings model
//!
//! Key/value pairs keyed by a unique string. Used both for scalar flags
//! (the PIN digest) and for small collections (budgets, goals) stored whole
//! under a single key.

use serde::{Deserialize, Serialize};

use super::ids::{BudgetId, GoalId};
use super::money::Money;

/// Reserved settings keys
pub mod keys {
    /// One-way digest of the access PIN
    pub const PIN_HASH: &str = "pinHash";
    /// Ordered list of budget entries
    pub const BUDGETS: &str = "budgets";
    /// Ordered list of goal entries
    pub const GOALS: &str = "goals";
}

/// A single settings record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    /// Unique key
    pub key: String,
    /// Arbitrary JSON value
    pub value: serde_json::Value,
}

impl Setting {
    /// Create a new setting
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A per-category spending limit, stored in the `budgets` settings list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntry {
    /// Unique identifier
    pub id: BudgetId,
    /// Category name the limit applies to
    pub name: String,
    /// Monthly spending limit
    pub limit: Money,
}

impl BudgetEntry {
    /// Create a new budget entry
    pub fn new(name: impl Into<String>, limit: Money) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            limit,
        }
    }
}

/// A savings target, stored in the `goals` settings list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEntry {
    /// Unique identifier
    pub id: GoalId,
    /// Goal title
    pub title: String,
    /// Target amount
    pub target: Money,
}

impl GoalEntry {
    /// Create a new goal entry
    pub fn new(title: impl Into<String>, target: Money) -> Self {
        Self {
            id: GoalId::new(),
            title: title.into(),
            target,
        }
    }
}
