//! Vault master key generation and envelope encryption.
//!
//! The vault master key encrypts every item in a user's vault. It is
//! generated once at registration, stored server-side only in wrapped
//! (encrypted) form under the password-derived wrapping key, and held
//! unwrapped in client memory only for the lifetime of a session.

use rand::RngCore;
use zeroize::Zeroize;

use crate::crypto::aead;
use crate::crypto::kdf::WrappingKey;
use crate::errors::{Result, VaultError};

/// Length of the vault master key in bytes (256 bits).
const MASTER_KEY_LEN: usize = 32;

/// The single symmetric key that encrypts every vault item.
///
/// Zeroed on drop. Owned exclusively by the active session; it never
/// leaves client memory in unwrapped form.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct VaultMasterKey {
    bytes: [u8; MASTER_KEY_LEN],
}

impl VaultMasterKey {
    /// Draw a fresh random 256-bit key. Called once, at registration.
    pub fn generate() -> Self {
        let mut bytes = [0u8; MASTER_KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Access the raw key bytes (to pass to the AEAD layer).
    pub fn as_bytes(&self) -> &[u8; MASTER_KEY_LEN] {
        &self.bytes
    }
}

/// Encrypt the vault master key under the wrapping key.
///
/// Returns the wrapped key ciphertext and the nonce used for the wrap,
/// which are stored server-side in the credential record.
pub fn wrap_vault_key(
    wrapping_key: &WrappingKey,
    master_key: &VaultMasterKey,
) -> Result<(Vec<u8>, [u8; aead::NONCE_LEN])> {
    aead::seal(wrapping_key.as_bytes(), master_key.as_bytes())
}

/// Decrypt a wrapped vault master key.
///
/// A failure here means the supplied password's derived wrapping key
/// does not match the one used at registration (wrong password, or a
/// tampered stored envelope). Both surface as `DecryptionFailed`.
pub fn unwrap_vault_key(
    wrapping_key: &WrappingKey,
    wrapped: &[u8],
    nonce: &[u8; aead::NONCE_LEN],
) -> Result<VaultMasterKey> {
    let mut plain = aead::open(wrapping_key.as_bytes(), wrapped, nonce)
        .map_err(|_| VaultError::DecryptionFailed)?;

    if plain.len() != MASTER_KEY_LEN {
        plain.zeroize();
        return Err(VaultError::DecryptionFailed);
    }

    let mut bytes = [0u8; MASTER_KEY_LEN];
    bytes.copy_from_slice(&plain);
    plain.zeroize();

    Ok(VaultMasterKey { bytes })
}
