//! Storage collaborator: the server that holds only ciphertext.
//!
//! This module provides:
//! - The `StorageBackend` trait the session talks through (`mod.rs`)
//! - Wire DTOs and fixed-width hex helpers (`wire`)
//! - The ureq HTTP client for a real server (`http`)
//! - An in-memory backend with the same semantics (`memory`)

pub mod http;
pub mod memory;
pub mod wire;

pub use http::HttpStore;
pub use memory::MemoryStore;

use crate::crypto::{AUTH_KEY_LEN, NONCE_LEN, SALT_LEN};
use crate::errors::Result;

/// Opaque bearer credential issued by the server on login.
///
/// Carries no cryptographic relationship to the vault key: losing it
/// exposes ciphertext access, not plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything the server needs to create a credential record.
/// None of it suffices to decrypt the vault.
pub struct NewAccount {
    pub email: String,
    pub auth_key: [u8; AUTH_KEY_LEN],
    pub kdf_salt: [u8; SALT_LEN],
    pub wrapped_vault_key: Vec<u8>,
    pub wrap_nonce: [u8; NONCE_LEN],
}

/// What the server hands back on successful authentication.
pub struct LoginGrant {
    pub token: SessionToken,
    pub wrapped_vault_key: Vec<u8>,
    pub wrap_nonce: [u8; NONCE_LEN],
}

/// One stored item exactly as the server holds it: opaque ciphertext,
/// its nonce, and the server-assigned id.
#[derive(Debug, Clone)]
pub struct CipherRecord {
    pub id: String,
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_LEN],
}

/// The server's external contract, as seen by a `VaultSession`.
///
/// Implementations map their own failure modes onto the error
/// taxonomy: `EmailAlreadyRegistered`, `UnknownAccount`,
/// `InvalidCredentials`, and `NetworkFailure` for everything else.
/// No call is retried internally.
pub trait StorageBackend {
    /// Create a credential record. Fails with `EmailAlreadyRegistered`
    /// if the email is taken.
    fn register(&self, account: &NewAccount) -> Result<()>;

    /// Fetch the KDF salt for an email. Fails with `UnknownAccount`.
    fn fetch_salt(&self, email: &str) -> Result<[u8; SALT_LEN]>;

    /// Prove password knowledge via the auth key. Fails with
    /// `InvalidCredentials` on mismatch.
    fn login(&self, email: &str, auth_key: &[u8; AUTH_KEY_LEN]) -> Result<LoginGrant>;

    /// List every stored item for the authenticated user.
    fn list_items(&self, token: &SessionToken) -> Result<Vec<CipherRecord>>;

    /// Store a new item; the server assigns and returns its id.
    fn create_item(
        &self,
        token: &SessionToken,
        ciphertext: &[u8],
        nonce: &[u8; NONCE_LEN],
    ) -> Result<String>;

    /// Replace an item's ciphertext, keyed by id.
    fn update_item(
        &self,
        token: &SessionToken,
        id: &str,
        ciphertext: &[u8],
        nonce: &[u8; NONCE_LEN],
    ) -> Result<()>;

    /// Remove an item from the authoritative collection. Irreversible.
    fn delete_item(&self, token: &SessionToken, id: &str) -> Result<()>;
}
