//! Key derivation for encrypted backups
//!
//! Derives AES-256 keys from the export password using PBKDF2-HMAC-SHA256
//! with a per-export random salt. The salt travels in the backup container,
//! so the same password re-derives the same key on import.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the key-derivation salt in bytes
pub const SALT_SIZE: usize = 16;

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Size of the derived key in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// A derived encryption key, zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

/// Derive an AES-256 key from a password and salt
pub fn derive_key(password: &str, salt: &[u8; SALT_SIZE]) -> DerivedKey {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_password_same_salt_same_key() {
        let salt = [7u8; SALT_SIZE];
        let key1 = derive_key("correct horse", &salt);
        let key2 = derive_key("correct horse", &salt);
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_password_different_key() {
        let salt = [7u8; SALT_SIZE];
        let key1 = derive_key("password one", &salt);
        let key2 = derive_key("password two", &salt);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("same password", &[1u8; SALT_SIZE]);
        let key2 = derive_key("same password", &[2u8; SALT_SIZE]);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }
}
