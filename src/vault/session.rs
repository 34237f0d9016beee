//! The vault session: registration, login, and item CRUD against the
//! storage collaborator.
//!
//! A `VaultSession` is the explicit owner of the unwrapped vault
//! master key. It exists only between a fully successful login and
//! logout. There is no ambient "current session" state, and a failed
//! login leaves nothing behind. All operations are blocking
//! request/response cycles; nothing is retried internally.
//!
//! Two sessions mutating the same item race at the storage layer with
//! last-write-wins semantics. That is an accepted limitation of the
//! single-device design, not a guarantee.

use crate::crypto::{self, VaultMasterKey};
use crate::errors::{Result, VaultError};
use crate::storage::{NewAccount, SessionToken, StorageBackend};

use super::codec;
use super::item::{Category, EntryState, VaultEntry, VaultItem, View};

/// An unlocked vault bound to one authenticated user.
pub struct VaultSession<S: StorageBackend> {
    store: S,
    token: SessionToken,
    vault_key: VaultMasterKey,
    entries: Vec<VaultEntry>,
}

impl<S: StorageBackend> VaultSession<S> {
    /// Create a new account.
    ///
    /// Draws a random salt, derives the auth/wrapping key pair,
    /// generates a fresh vault master key, wraps it, and submits the
    /// credential record. The password and the unwrapped master key
    /// never leave this function.
    pub fn register(store: &S, email: &str, password: &str) -> Result<()> {
        let kdf_salt = crypto::generate_salt();
        let (auth_key, wrapping_key) = crypto::derive_keys(password.as_bytes(), &kdf_salt);

        let master_key = VaultMasterKey::generate();
        let (wrapped_vault_key, wrap_nonce) =
            crypto::wrap_vault_key(&wrapping_key, &master_key)?;

        store.register(&NewAccount {
            email: email.to_string(),
            auth_key,
            kdf_salt,
            wrapped_vault_key,
            wrap_nonce,
        })
    }

    /// Authenticate and unlock the vault.
    ///
    /// Fetches the account salt, re-derives the key pair, proves
    /// password knowledge with the auth key, unwraps the vault master
    /// key, and loads + decodes every stored item. An unwrap failure
    /// is reported as `InvalidCredentials`, identical to a wrong
    /// password; distinguishing "wrong password" from "corrupted
    /// envelope" would leak information.
    pub fn login(store: S, email: &str, password: &str) -> Result<Self> {
        let kdf_salt = store.fetch_salt(email)?;
        let (auth_key, wrapping_key) = crypto::derive_keys(password.as_bytes(), &kdf_salt);

        let grant = store.login(email, &auth_key)?;

        let vault_key =
            crypto::unwrap_vault_key(&wrapping_key, &grant.wrapped_vault_key, &grant.wrap_nonce)
                .map_err(|_| VaultError::InvalidCredentials)?;

        // Load and decode the full vault. Records that fail to decode
        // stay in the list as corrupted entries; they are never
        // silently dropped.
        let records = store.list_items(&grant.token)?;
        let entries = records
            .into_iter()
            .map(|r| {
                let state = match codec::decode(&vault_key, &r.ciphertext, &r.nonce) {
                    Ok(item) => EntryState::Valid(item),
                    Err(_) => EntryState::Undecryptable,
                };
                VaultEntry { id: r.id, state }
            })
            .collect();

        Ok(Self {
            store,
            token: grant.token,
            vault_key,
            entries,
        })
    }

    /// End the session. The master key and token are discarded; the
    /// key bytes are zeroed on drop.
    pub fn logout(self) {}

    // ------------------------------------------------------------------
    // Listing
    // ------------------------------------------------------------------

    /// Every entry in the vault, corrupted ones included.
    pub fn entries(&self) -> &[VaultEntry] {
        &self.entries
    }

    /// Entries matching a view and category filter. Undecryptable
    /// entries are included in every view so they stay visible.
    pub fn entries_in(&self, view: View, category: Category) -> Vec<&VaultEntry> {
        self.entries
            .iter()
            .filter(|e| match e.item() {
                Some(item) => view.matches(item) && category.matches(item),
                None => true,
            })
            .collect()
    }

    /// Look up one entry by id.
    pub fn entry(&self, id: &str) -> Result<&VaultEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| VaultError::ItemNotFound(id.to_string()))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Encrypt and store a new item. The server assigns the id; the
    /// plaintext joins the in-memory collection.
    pub fn create_item(&mut self, item: VaultItem) -> Result<String> {
        let (ciphertext, nonce) = codec::encode(&self.vault_key, &item)?;
        let id = self.store.create_item(&self.token, &ciphertext, &nonce)?;

        self.entries.push(VaultEntry {
            id: id.clone(),
            state: EntryState::Valid(item),
        });
        Ok(id)
    }

    /// Re-encrypt the full record under a fresh nonce and replace it
    /// server-side, keyed by id.
    pub fn update_item(&mut self, id: &str, item: VaultItem) -> Result<()> {
        let (ciphertext, nonce) = codec::encode(&self.vault_key, &item)?;
        self.store
            .update_item(&self.token, id, &ciphertext, &nonce)?;

        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| VaultError::ItemNotFound(id.to_string()))?;
        entry.state = EntryState::Valid(item);
        Ok(())
    }

    /// Flip the favorite flag. Returns the new state.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let mut item = self.cloned_item(id)?;
        item.is_favorite = !item.is_favorite;
        let now_favorite = item.is_favorite;
        self.update_item(id, item)?;
        Ok(now_favorite)
    }

    /// Move an item to the trash. Reversible via `restore`.
    pub fn soft_delete(&mut self, id: &str) -> Result<()> {
        let mut item = self.cloned_item(id)?;
        item.is_deleted = true;
        self.update_item(id, item)
    }

    /// Bring a trashed item back to the active view.
    pub fn restore(&mut self, id: &str) -> Result<()> {
        let mut item = self.cloned_item(id)?;
        item.is_deleted = false;
        self.update_item(id, item)
    }

    /// Remove an item from the server and the in-memory collection.
    /// Irreversible, and only allowed once the item is already in the
    /// trash. This is the two-step guard against accidental loss.
    pub fn permanent_delete(&mut self, id: &str) -> Result<()> {
        let entry = self.entry(id)?;
        match entry.item() {
            Some(item) if !item.is_deleted => {
                return Err(VaultError::NotInTrash(id.to_string()));
            }
            // Corrupted entries can be purged: they cannot be soft
            // deleted first because their flags are unreadable.
            _ => {}
        }

        self.store.delete_item(&self.token, id)?;
        self.entries.retain(|e| e.id != id);
        Ok(())
    }

    /// Clone the plaintext of a valid entry for a flag-flip mutation.
    fn cloned_item(&self, id: &str) -> Result<VaultItem> {
        match &self.entry(id)?.state {
            EntryState::Valid(item) => Ok(item.clone()),
            EntryState::Undecryptable => Err(VaultError::ItemCorrupted(id.to_string())),
        }
    }
}
