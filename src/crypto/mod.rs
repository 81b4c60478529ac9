//! Cryptographic primitives for fintrack-core
//!
//! AES-256-GCM authenticated encryption with PBKDF2-HMAC-SHA256 key
//! derivation, used by the backup codec for password-encrypted exports.

pub mod encryption;
pub mod key_derivation;

pub use encryption::{open, seal, NONCE_SIZE};
pub use key_derivation::{derive_key, DerivedKey, KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE};
