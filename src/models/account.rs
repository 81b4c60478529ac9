//! Account model
//!
//! Represents user accounts (cash, bank, wallet, etc.). The `kind` tag is an
//! open string rather than a closed enum so consumers can introduce their own
//! groupings without a schema change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// A financial account
///
/// `balance` is derived from the transaction log by the recalculation engine
/// and must never be written directly by callers; `initial_balance` is the
/// only balance input a caller controls, set at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Everyday Checking")
    pub name: String,

    /// Kind tag, open string (e.g., "Cash", "Bank", "Wallet")
    #[serde(rename = "type")]
    pub kind: String,

    /// Originating institution, empty when not applicable
    #[serde(default)]
    pub bank: String,

    /// Opening balance, set once at creation
    pub initial_balance: Money,

    /// Derived balance, maintained by the recalculation engine
    pub balance: Money,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account; `balance` starts equal to `initial_balance`
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        bank: impl Into<String>,
        initial_balance: Money,
    ) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            kind: kind.into(),
            bank: bank.into(),
            initial_balance,
            balance: initial_balance,
            created_at: Utc::now(),
        }
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
