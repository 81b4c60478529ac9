//! AES-256-GCM authenticated encryption for backup payloads
//!
//! Each seal draws a fresh random nonce; the nonce is returned alongside the
//! ciphertext so the caller can embed it in the container layout. Opening
//! verifies the authentication tag, so a wrong key or a tampered payload is
//! rejected rather than decrypted into garbage.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};

use crate::error::{LedgerError, LedgerResult};

use super::key_derivation::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Encrypt plaintext under the derived key with a fresh random nonce
pub fn seal(plaintext: &[u8], key: &DerivedKey) -> LedgerResult<([u8; NONCE_SIZE], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| LedgerError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| LedgerError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok((nonce_bytes, ciphertext))
}

/// Authenticate and decrypt a sealed payload
///
/// Fails with `Authentication` when the key is wrong or the ciphertext has
/// been altered; no partial plaintext is ever returned.
pub fn open(nonce: &[u8], ciphertext: &[u8], key: &DerivedKey) -> LedgerResult<Vec<u8>> {
    if nonce.len() != NONCE_SIZE {
        return Err(LedgerError::Encryption(format!(
            "Invalid nonce size: expected {}, got {}",
            NONCE_SIZE,
            nonce.len()
        )));
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| LedgerError::Encryption(format!("Failed to create cipher: {}", e)))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| {
            LedgerError::Authentication("wrong password or corrupted backup".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_derivation::{derive_key, SALT_SIZE};

    fn test_key() -> DerivedKey {
        derive_key("test password", &[42u8; SALT_SIZE])
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let key = test_key();
        let plaintext = b"ledger contents";

        let (nonce, ciphertext) = seal(plaintext, &key).unwrap();
        let opened = open(&nonce, &ciphertext, &key).unwrap();

        assert_eq!(opened, plaintext);
    }

    #[test]
    fn test_fresh_nonce_per_seal() {
        let key = test_key();
        let plaintext = b"ledger contents";

        let (nonce1, ciphertext1) = seal(plaintext, &key).unwrap();
        let (nonce2, ciphertext2) = seal(plaintext, &key).unwrap();

        assert_ne!(nonce1, nonce2);
        assert_ne!(ciphertext1, ciphertext2);
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let key = test_key();
        let other = derive_key("other password", &[42u8; SALT_SIZE]);

        let (nonce, ciphertext) = seal(b"secret", &key).unwrap();
        let result = open(&nonce, &ciphertext, &other);

        assert!(matches!(result, Err(LedgerError::Authentication(_))));
    }

    #[test]
    fn test_tampered_ciphertext_fails_authentication() {
        let key = test_key();
        let (nonce, mut ciphertext) = seal(b"secret", &key).unwrap();

        ciphertext[0] ^= 0xFF;
        let result = open(&nonce, &ciphertext, &key);

        assert!(matches!(result, Err(LedgerError::Authentication(_))));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key();
        let (nonce, ciphertext) = seal(b"", &key).unwrap();
        let opened = open(&nonce, &ciphertext, &key).unwrap();
        assert!(opened.is_empty());
    }
}
