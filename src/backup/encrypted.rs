//! Password-encrypted backup container
//!
//! Byte layout: `salt[16] || iv[12] || ciphertext+tag`. The salt feeds key
//! derivation, the iv is the AES-GCM nonce, and both are drawn fresh from the
//! OS RNG on every export. The ciphertext is the plaintext backup JSON.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

use crate::crypto::{derive_key, open, seal, NONCE_SIZE, SALT_SIZE};
use crate::error::{LedgerError, LedgerResult};

use super::snapshot::Snapshot;

/// Fixed-size prefix before the ciphertext
const HEADER_SIZE: usize = SALT_SIZE + NONCE_SIZE;

/// Encrypt a snapshot under the given password
pub fn encrypt_snapshot(snapshot: &Snapshot, password: &str) -> LedgerResult<Vec<u8>> {
    let plaintext = snapshot.to_json()?;

    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    let key = derive_key(password, &salt);

    let (nonce, ciphertext) = seal(plaintext.as_bytes(), &key)?;

    let mut payload = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ciphertext);
    Ok(payload)
}

/// Decrypt and parse an encrypted backup
///
/// Fails with `Format` when the payload is shorter than the fixed prefix,
/// `Authentication` when the password is wrong or the file was tampered with,
/// and `Format` when the decrypted JSON does not parse as a snapshot.
pub fn decrypt_snapshot(bytes: &[u8], password: &str) -> LedgerResult<Snapshot> {
    if bytes.len() <= HEADER_SIZE {
        return Err(LedgerError::Format(format!(
            "Encrypted backup too short: {} bytes (need more than {})",
            bytes.len(),
            HEADER_SIZE
        )));
    }

    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&bytes[..SALT_SIZE]);
    let nonce = &bytes[SALT_SIZE..HEADER_SIZE];
    let ciphertext = &bytes[HEADER_SIZE..];

    let key = derive_key(password, &salt);
    let plaintext = open(nonce, ciphertext, &key)?;

    let text = String::from_utf8(plaintext)
        .map_err(|e| LedgerError::Format(format!("Decrypted backup is not UTF-8: {}", e)))?;
    Snapshot::from_json(&text)
}
