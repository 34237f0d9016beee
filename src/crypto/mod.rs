//! Cryptographic primitives for ZeroVault.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption with detached nonces (`aead`)
//! - PBKDF2 password-based key derivation with the auth/wrap split (`kdf`)
//! - Vault master key generation and envelope wrap/unwrap (`envelope`)

pub mod aead;
pub mod envelope;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_keys, ...};
pub use aead::{open, seal, NONCE_LEN};
pub use envelope::{unwrap_vault_key, wrap_vault_key, VaultMasterKey};
pub use kdf::{derive_keys, generate_salt, WrappingKey, AUTH_KEY_LEN, SALT_LEN};
