//! AES-256-GCM authenticated encryption with detached nonces.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and
//! returns it alongside the ciphertext, because the storage server
//! keeps the two in separate fields. `open` fails closed: a tag
//! mismatch or malformed input yields `AuthenticationFailed`, never
//! garbage plaintext. Callers must treat a failed open as
//! "undecryptable", not as empty or absent data.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of an AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// Encrypt `plaintext` with a 32-byte `key` under a fresh random nonce.
///
/// Returns the ciphertext (including the 16-byte auth tag) and the
/// nonce separately. Never reuses a nonce: each call draws a new one.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<(Vec<u8>, [u8; NONCE_LEN])> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    nonce_bytes.copy_from_slice(&nonce);
    Ok((ciphertext, nonce_bytes))
}

/// Decrypt a (ciphertext, nonce) pair produced by `seal`.
///
/// Verifies the auth tag before returning any plaintext.
pub fn open(key: &[u8; KEY_LEN], ciphertext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>> {
    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|_| VaultError::AuthenticationFailed)?;

    let nonce = Nonce::from_slice(nonce);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::AuthenticationFailed)
}
