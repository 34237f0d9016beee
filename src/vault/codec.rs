//! Item encode/decode under the vault master key.
//!
//! `encode` serializes the full record, type tag and variant fields and
//! shared flags alike, to canonical JSON bytes and seals them. Every
//! encode draws a fresh nonce, even for a pure flag flip.
//!
//! `decode` opens and deserializes. Both an authentication failure and
//! a schema mismatch collapse to `Undecryptable`: the caller gets a
//! whole item or nothing, never a partially populated one.

use crate::crypto::{aead, VaultMasterKey};
use crate::errors::{Result, VaultError};

use super::item::VaultItem;

/// Serialize and encrypt an item under the vault master key.
pub fn encode(vault_key: &VaultMasterKey, item: &VaultItem) -> Result<(Vec<u8>, [u8; aead::NONCE_LEN])> {
    let plaintext = serde_json::to_vec(item)
        .map_err(|e| VaultError::SerializationError(format!("item: {e}")))?;

    aead::seal(vault_key.as_bytes(), &plaintext)
}

/// Decrypt and deserialize a stored (ciphertext, nonce) pair.
///
/// Returns `Undecryptable` if the tag check fails or the plaintext
/// does not match the item schema.
pub fn decode(
    vault_key: &VaultMasterKey,
    ciphertext: &[u8],
    nonce: &[u8; aead::NONCE_LEN],
) -> Result<VaultItem> {
    let plaintext = aead::open(vault_key.as_bytes(), ciphertext, nonce)
        .map_err(|_| VaultError::Undecryptable)?;

    serde_json::from_slice(&plaintext).map_err(|_| VaultError::Undecryptable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::aead;

    #[test]
    fn encode_decode_roundtrip() {
        let key = VaultMasterKey::generate();
        let item = VaultItem::login("Bank", Some("https://bank.test".into()), "u", "p");

        let (ciphertext, nonce) = encode(&key, &item).unwrap();
        let decoded = decode(&key, &ciphertext, &nonce).unwrap();

        assert_eq!(decoded, item);
    }

    #[test]
    fn decode_with_wrong_key_is_undecryptable() {
        let key = VaultMasterKey::generate();
        let other = VaultMasterKey::generate();
        let item = VaultItem::login("Bank", None, "u", "p");

        let (ciphertext, nonce) = encode(&key, &item).unwrap();
        let result = decode(&other, &ciphertext, &nonce);

        assert!(matches!(result, Err(VaultError::Undecryptable)));
    }

    #[test]
    fn valid_ciphertext_with_wrong_schema_is_undecryptable() {
        // Authenticates fine, but the plaintext is not an item.
        let key = VaultMasterKey::generate();
        let (ciphertext, nonce) = aead::seal(key.as_bytes(), b"{\"not\":\"an item\"}").unwrap();

        let result = decode(&key, &ciphertext, &nonce);
        assert!(matches!(result, Err(VaultError::Undecryptable)));
    }

    #[test]
    fn flag_flip_reencodes_under_a_fresh_nonce() {
        let key = VaultMasterKey::generate();
        let mut item = VaultItem::login("Bank", None, "u", "p");

        let (ct1, nonce1) = encode(&key, &item).unwrap();
        item.is_favorite = true;
        let (ct2, nonce2) = encode(&key, &item).unwrap();

        assert_ne!(nonce1, nonce2);
        assert_ne!(ct1, ct2);
    }
}
