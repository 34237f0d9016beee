//! Vault module: item model, item crypto, and the session.
//!
//! This module provides:
//! - `VaultItem` / `ItemKind` and the view filters (`item`)
//! - Item encode/decode under the vault master key (`codec`)
//! - The `VaultSession` lifecycle and CRUD orchestration (`session`)

pub mod codec;
pub mod item;
pub mod session;

// Re-export the most commonly used items.
pub use item::{Category, EntryState, ItemKind, VaultEntry, VaultItem, View};
pub use session::VaultSession;
