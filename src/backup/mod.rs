//! Backup codec for fintrack-core
//!
//! Serializes the full dataset to a portable snapshot, as plaintext JSON or
//! as a password-encrypted binary container. Restoring is destructive-replace
//! and always rederives balances; the engine wires the two together.

pub mod encrypted;
pub mod snapshot;

pub use encrypted::{decrypt_snapshot, encrypt_snapshot};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
