//! Audit logging for fintrack-core
//!
//! Every successful mutation appends one record to an on-device JSONL log,
//! giving a durable trail of what changed and when.

pub mod entry;
pub mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
