//! In-memory storage backend.
//!
//! Honors the same contract as the real server: unique emails,
//! constant-time auth-key verification, opaque bearer tokens, and
//! server-assigned item ids. Used by the test suite and as an offline
//! demo backend. Cloning yields another handle onto the same shared
//! state, so a test can keep one handle for out-of-band inspection
//! while a session owns the other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use rand::RngCore;
use subtle::ConstantTimeEq;

use crate::crypto::{AUTH_KEY_LEN, NONCE_LEN, SALT_LEN};
use crate::errors::{Result, VaultError};

use super::{CipherRecord, LoginGrant, NewAccount, SessionToken, StorageBackend};

struct UserRecord {
    auth_key: [u8; AUTH_KEY_LEN],
    kdf_salt: [u8; SALT_LEN],
    wrapped_vault_key: Vec<u8>,
    wrap_nonce: [u8; NONCE_LEN],
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    /// token -> email
    tokens: HashMap<String, String>,
    /// email -> stored items
    items: HashMap<String, Vec<CipherRecord>>,
    next_id: u64,
}

/// Shared-state in-memory backend.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another test thread panicked;
        // the data itself is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// How many records the server holds for `email`, decryptable or
    /// not. Raw storage view; bypasses the session entirely.
    pub fn stored_item_count(&self, email: &str) -> usize {
        self.lock().items.get(email).map_or(0, Vec::len)
    }

    /// Flip one byte of a stored item's ciphertext. Returns false if
    /// the item does not exist.
    pub fn corrupt_item(&self, email: &str, id: &str) -> bool {
        let mut inner = self.lock();
        let Some(records) = inner.items.get_mut(email) else {
            return false;
        };
        match records
            .iter_mut()
            .find(|r| r.id == id)
            .and_then(|r| r.ciphertext.first_mut())
        {
            Some(byte) => {
                *byte ^= 0xFF;
                true
            }
            None => false,
        }
    }

    fn email_for_token(inner: &Inner, token: &SessionToken) -> Result<String> {
        inner
            .tokens
            .get(token.as_str())
            .cloned()
            .ok_or_else(|| VaultError::NetworkFailure("invalid session token".into()))
    }
}

fn random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

impl StorageBackend for MemoryStore {
    fn register(&self, account: &NewAccount) -> Result<()> {
        let mut inner = self.lock();
        if inner.users.contains_key(&account.email) {
            return Err(VaultError::EmailAlreadyRegistered(account.email.clone()));
        }

        inner.users.insert(
            account.email.clone(),
            UserRecord {
                auth_key: account.auth_key,
                kdf_salt: account.kdf_salt,
                wrapped_vault_key: account.wrapped_vault_key.clone(),
                wrap_nonce: account.wrap_nonce,
            },
        );
        Ok(())
    }

    fn fetch_salt(&self, email: &str) -> Result<[u8; SALT_LEN]> {
        self.lock()
            .users
            .get(email)
            .map(|u| u.kdf_salt)
            .ok_or_else(|| VaultError::UnknownAccount(email.to_string()))
    }

    fn login(&self, email: &str, auth_key: &[u8; AUTH_KEY_LEN]) -> Result<LoginGrant> {
        let mut inner = self.lock();

        let grant = {
            let user = inner
                .users
                .get(email)
                .ok_or(VaultError::InvalidCredentials)?;

            if !bool::from(user.auth_key.ct_eq(auth_key)) {
                return Err(VaultError::InvalidCredentials);
            }

            LoginGrant {
                token: SessionToken::new(random_token()),
                wrapped_vault_key: user.wrapped_vault_key.clone(),
                wrap_nonce: user.wrap_nonce,
            }
        };

        inner
            .tokens
            .insert(grant.token.as_str().to_string(), email.to_string());
        Ok(grant)
    }

    fn list_items(&self, token: &SessionToken) -> Result<Vec<CipherRecord>> {
        let inner = self.lock();
        let email = Self::email_for_token(&inner, token)?;
        Ok(inner.items.get(&email).cloned().unwrap_or_default())
    }

    fn create_item(
        &self,
        token: &SessionToken,
        ciphertext: &[u8],
        nonce: &[u8; NONCE_LEN],
    ) -> Result<String> {
        let mut inner = self.lock();
        let email = Self::email_for_token(&inner, token)?;

        inner.next_id += 1;
        let id = format!("itm-{:06}", inner.next_id);

        inner.items.entry(email).or_default().push(CipherRecord {
            id: id.clone(),
            ciphertext: ciphertext.to_vec(),
            nonce: *nonce,
        });
        Ok(id)
    }

    fn update_item(
        &self,
        token: &SessionToken,
        id: &str,
        ciphertext: &[u8],
        nonce: &[u8; NONCE_LEN],
    ) -> Result<()> {
        let mut inner = self.lock();
        let email = Self::email_for_token(&inner, token)?;

        let record = inner
            .items
            .get_mut(&email)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or_else(|| VaultError::ItemNotFound(id.to_string()))?;

        record.ciphertext = ciphertext.to_vec();
        record.nonce = *nonce;
        Ok(())
    }

    fn delete_item(&self, token: &SessionToken, id: &str) -> Result<()> {
        let mut inner = self.lock();
        let email = Self::email_for_token(&inner, token)?;

        let records = inner
            .items
            .get_mut(&email)
            .ok_or_else(|| VaultError::ItemNotFound(id.to_string()))?;

        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(VaultError::ItemNotFound(id.to_string()));
        }
        Ok(())
    }
}
