//! Transaction model
//!
//! Represents financial events on an account. The amount is always positive;
//! its effect on the balance is implied by the type tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// The five recognized transaction tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money entering the account
    Income,
    /// Money leaving the account
    Expense,
    /// Money moved into an investment
    Investment,
    /// Outgoing leg of a transfer pair
    TransferOut,
    /// Incoming leg of a transfer pair
    TransferIn,
}

impl TransactionType {
    /// Parse a transaction type from its wire tag
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "investment" => Some(Self::Investment),
            "transfer_out" => Some(Self::TransferOut),
            "transfer_in" => Some(Self::TransferIn),
            _ => None,
        }
    }

    /// The sign this type applies to the account balance
    pub fn balance_sign(&self) -> i64 {
        match self {
            Self::Income | Self::TransferIn => 1,
            Self::Expense | Self::Investment | Self::TransferOut => -1,
        }
    }

    /// Whether this is one leg of a transfer pair
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::TransferOut | Self::TransferIn)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Investment => write!(f, "investment"),
            Self::TransferOut => write!(f, "transfer_out"),
            Self::TransferIn => write!(f, "transfer_in"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// What kind of event this is
    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Category name, empty when uncategorized
    #[serde(default)]
    pub category: String,

    /// Subcategory name, empty when unused
    #[serde(default)]
    pub subcategory: String,

    /// Amount, always positive; sign is implied by `tx_type`
    pub amount: Money,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Event timestamp, used for ordering and monthly bucketing
    pub date: DateTime<Utc>,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Opaque metadata bag for consumers
    #[serde(default)]
    pub meta: serde_json::Value,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        tx_type: TransactionType,
        amount: Money,
        account_id: AccountId,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            tx_type,
            category: String::new(),
            subcategory: String::new(),
            amount,
            account_id,
            date,
            description: String::new(),
            meta: serde_json::Value::Null,
        }
    }

    /// Signed effect of this transaction on its account's balance
    pub fn signed_amount(&self) -> Money {
        if self.tx_type.balance_sign() >= 0 {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Whether this is one leg of a transfer pair
    pub fn is_transfer(&self) -> bool {
        self.tx_type.is_transfer()
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.tx_type,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
