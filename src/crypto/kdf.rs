//! Password-based key derivation using PBKDF2-HMAC-SHA-256.
//!
//! A single slow derivation over (password, salt) produces 64 bytes:
//! the first half is the **auth key** sent to the server as proof of
//! password knowledge, the second half becomes the **wrapping key**
//! that decrypts the vault master key and never leaves this process.
//! Splitting one output keeps the two values disjoint in use: a
//! leaked auth key does not yield the wrapping key without redoing
//! the full derivation.
//!
//! The iteration count and salt length are protocol constants shared
//! with every verifying party; changing either produces unrelated keys.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

/// Length of the KDF salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the auth key in bytes (256 bits).
pub const AUTH_KEY_LEN: usize = 32;

/// Length of the wrapping key in bytes (256 bits, AES-256).
const WRAP_KEY_LEN: usize = 32;

/// PBKDF2 iteration count. Deliberately expensive (hundreds of
/// milliseconds) to resist offline guessing.
const PBKDF2_ITERATIONS: u32 = 100_000;

/// The password-derived AES-256 key used only to wrap and unwrap the
/// vault master key. Zeroed on drop; callers must not retain it past
/// the unwrap step.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct WrappingKey {
    bytes: [u8; WRAP_KEY_LEN],
}

impl WrappingKey {
    /// Access the raw key bytes (to pass to the AEAD layer).
    pub fn as_bytes(&self) -> &[u8; WRAP_KEY_LEN] {
        &self.bytes
    }
}

/// Derive the auth key and wrapping key from a password and salt.
///
/// Deterministic: the same (password, salt) always yields the same
/// pair. The auth key is safe to transmit; the wrapping key is not.
pub fn derive_keys(password: &[u8], salt: &[u8; SALT_LEN]) -> ([u8; AUTH_KEY_LEN], WrappingKey) {
    let mut output = Zeroizing::new([0u8; AUTH_KEY_LEN + WRAP_KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ITERATIONS, &mut output[..]);

    let mut auth_key = [0u8; AUTH_KEY_LEN];
    let mut wrap_bytes = [0u8; WRAP_KEY_LEN];
    auth_key.copy_from_slice(&output[..AUTH_KEY_LEN]);
    wrap_bytes.copy_from_slice(&output[AUTH_KEY_LEN..]);

    (auth_key, WrappingKey { bytes: wrap_bytes })
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
