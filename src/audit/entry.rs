//! Audit entry records
//!
//! One entry per successful mutation: what happened, to which entity, and a
//! short human-readable detail where the identity alone is not enough.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of operations recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// A full-dataset replacement from a snapshot
    Restore,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Restore => write!(f, "RESTORE"),
        }
    }
}

/// Kinds of entities recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Account,
    Transaction,
    Category,
    Budget,
    Goal,
    Snapshot,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Account => write!(f, "Account"),
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::Category => write!(f, "Category"),
            EntityType::Budget => write!(f, "Budget"),
            EntityType::Goal => write!(f, "Goal"),
            EntityType::Snapshot => write!(f, "Snapshot"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// What was done
    pub operation: Operation,

    /// What it was done to
    pub entity_type: EntityType,

    /// ID of the affected entity
    pub entity_id: String,

    /// Human-readable label (e.g. account name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// One-line description of the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name: None,
            detail: None,
        }
    }

    /// Entry for a create operation
    pub fn create(entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self::new(Operation::Create, entity_type, entity_id)
    }

    /// Entry for an update operation
    pub fn update(entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self::new(Operation::Update, entity_type, entity_id)
    }

    /// Entry for a delete operation
    pub fn delete(entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self::new(Operation::Delete, entity_type, entity_id)
    }

    /// Entry for a snapshot restore
    pub fn restore(detail: impl Into<String>) -> Self {
        Self::new(Operation::Restore, EntityType::Snapshot, "-").detail(detail)
    }

    /// Attach a human-readable label
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    /// Attach a one-line description of the change
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(detail) = &self.detail {
            output.push_str(&format!(": {}", detail));
        }

        output
    }
}
