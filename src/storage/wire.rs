//! Wire DTOs and hex helpers for the storage API.
//!
//! Every byte-sequence field crosses the wire as lowercase hexadecimal
//! text. Field names match the server contract: `auth_key`, `kdf_salt`,
//! `encrypted_vault_key`, `vault_key_iv` on the credential side and
//! `encrypted_data`, `iv` on the item side. Fixed-width fields are
//! length-checked on decode: a salt is 16 bytes, keys are 32, nonces
//! are 12, and anything else is a `WireFormat` error, not a guess.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub auth_key: String,
    pub kdf_salt: String,
    pub encrypted_vault_key: String,
    pub vault_key_iv: String,
}

#[derive(Serialize)]
pub struct SaltRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub auth_key: String,
}

#[derive(Serialize)]
pub struct ItemPayload {
    pub encrypted_data: String,
    pub iv: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct SaltResponse {
    pub kdf_salt: String,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub encrypted_vault_key: String,
    pub vault_key_iv: String,
}

#[derive(Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub encrypted_data: String,
    pub iv: String,
}

#[derive(Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Hex helpers
// ---------------------------------------------------------------------------

/// Encode bytes as lowercase hex for transmission.
pub fn encode_bytes(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a variable-length hex field (item ciphertext, wrapped key).
pub fn decode_bytes(field: &str, text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| VaultError::WireFormat(format!("{field}: {e}")))
}

/// Decode a hex field that must be exactly `N` bytes.
pub fn decode_fixed<const N: usize>(field: &str, text: &str) -> Result<[u8; N]> {
    let bytes = decode_bytes(field, text)?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| VaultError::WireFormat(format!("{field}: expected {N} bytes, got {len}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_lowercase_hex() {
        assert_eq!(encode_bytes(&[0xAB, 0x01, 0xFF]), "ab01ff");
    }

    #[test]
    fn decode_fixed_roundtrip() {
        let nonce = [7u8; 12];
        let text = encode_bytes(&nonce);
        let back: [u8; 12] = decode_fixed("iv", &text).unwrap();
        assert_eq!(back, nonce);
    }

    #[test]
    fn decode_fixed_rejects_wrong_length() {
        let err = decode_fixed::<12>("iv", "aabb").unwrap_err();
        assert!(matches!(err, VaultError::WireFormat(_)));
    }

    #[test]
    fn decode_rejects_non_hex() {
        assert!(decode_bytes("encrypted_data", "not-hex!").is_err());
    }

    #[test]
    fn decode_accepts_uppercase_input() {
        // We always emit lowercase, but tolerate either on read.
        let bytes = decode_bytes("encrypted_data", "AB01FF").unwrap();
        assert_eq!(bytes, vec![0xAB, 0x01, 0xFF]);
    }
}
