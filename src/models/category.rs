//! Category model
//!
//! Categories label income and expense transactions. A set of defaults is
//! seeded at first run and protected from deletion.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Which side of the ledger a category applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    /// Parse a category kind from its wire tag
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Income or expense
    pub kind: CategoryKind,

    /// Category name
    pub name: String,

    /// Seeded defaults carry this flag and are never deletable
    #[serde(default)]
    pub is_default: bool,
}

impl Category {
    /// Create a new user-defined category
    pub fn new(kind: CategoryKind, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            kind,
            name: name.into(),
            is_default: false,
        }
    }

    /// Create a seeded default category
    pub fn new_default(kind: CategoryKind, name: impl Into<String>) -> Self {
        Self {
            is_default: true,
            ..Self::new(kind, name)
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}
