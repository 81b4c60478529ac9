//! Access lock
//!
//! Optional PIN gate consumed by the presentation layer. The engine starts
//! `Locked` exactly when a PIN digest is stored in settings; otherwise it
//! starts `Unlocked`. The digest is a plain SHA-256 of the PIN (deterministic
//! and one-way, not a password KDF), and unlock attempts are unlimited.
//!
//! The lock does not gate the engine's read surface internally; it only
//! tracks state for the UI layer to enforce.

use std::sync::RwLock;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::{LedgerError, LedgerResult};

/// The two lock states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

/// Compute the one-way digest stored for a PIN
pub fn pin_digest(pin: &str) -> String {
    let digest = Sha256::digest(pin.as_bytes());
    STANDARD.encode(digest)
}

/// Session lock state machine
pub struct AccessLock {
    state: RwLock<LockState>,
}

impl AccessLock {
    /// Create the lock for a new session; locked iff a PIN digest is stored
    pub fn new(pin_present: bool) -> Self {
        let initial = if pin_present {
            LockState::Locked
        } else {
            LockState::Unlocked
        };
        Self {
            state: RwLock::new(initial),
        }
    }

    /// Current lock state
    pub fn state(&self) -> LedgerResult<LockState> {
        self.state
            .read()
            .map(|s| *s)
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    /// Whether the session is currently locked
    pub fn is_locked(&self) -> LedgerResult<bool> {
        Ok(self.state()? == LockState::Locked)
    }

    /// Transition to `Unlocked`
    pub fn mark_unlocked(&self) -> LedgerResult<()> {
        self.set(LockState::Unlocked)
    }

    /// Transition to `Locked`
    pub fn mark_locked(&self) -> LedgerResult<()> {
        self.set(LockState::Locked)
    }

    fn set(&self, next: LockState) -> LedgerResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *state = next;
        Ok(())
    }
}
