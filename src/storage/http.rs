//! HTTP implementation of the storage contract, built on ureq.
//!
//! Each method is one blocking request/response cycle. Failures are
//! mapped onto the error taxonomy at the endpoint that defines them:
//! a 4xx from `/register` means the email is taken, a 4xx from
//! `/get-salt` means the account is unknown, a 4xx from `/login`
//! means the credentials were rejected. Everything else (transport
//! errors, 5xx, bad response bodies) is a `NetworkFailure`.

use std::time::Duration;

use crate::errors::{Result, VaultError};

use super::wire::{
    self, CreatedResponse, ItemPayload, ItemRecord, LoginRequest, LoginResponse, RegisterRequest,
    SaltRequest, SaltResponse,
};
use super::{CipherRecord, LoginGrant, NewAccount, SessionToken, StorageBackend};
use crate::crypto::{AUTH_KEY_LEN, NONCE_LEN, SALT_LEN};

/// A storage client for one server base URL (e.g.
/// `http://127.0.0.1:3000/api/v1`).
pub struct HttpStore {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpStore {
    /// Build a client with the given base URL and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(token: &SessionToken) -> String {
        format!("Bearer {}", token.as_str())
    }
}

/// Read a JSON body, mapping parse failures to `NetworkFailure`.
fn read_json<T: serde::de::DeserializeOwned>(resp: ureq::Response) -> Result<T> {
    resp.into_json()
        .map_err(|e| VaultError::NetworkFailure(format!("bad response body: {e}")))
}

/// Map a ureq transport error (server unreachable, timeout) to our
/// taxonomy. Status errors are handled per-endpoint by the callers.
fn transport_err(err: ureq::Transport) -> VaultError {
    VaultError::NetworkFailure(err.to_string())
}

impl StorageBackend for HttpStore {
    fn register(&self, account: &NewAccount) -> Result<()> {
        let req = RegisterRequest {
            email: &account.email,
            auth_key: wire::encode_bytes(&account.auth_key),
            kdf_salt: wire::encode_bytes(&account.kdf_salt),
            encrypted_vault_key: wire::encode_bytes(&account.wrapped_vault_key),
            vault_key_iv: wire::encode_bytes(&account.wrap_nonce),
        };

        match self.agent.post(&self.url("/register")).send_json(&req) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, _)) if (400..500).contains(&code) => {
                Err(VaultError::EmailAlreadyRegistered(account.email.clone()))
            }
            Err(ureq::Error::Status(code, _)) => {
                Err(VaultError::NetworkFailure(format!("register: HTTP {code}")))
            }
            Err(ureq::Error::Transport(t)) => Err(transport_err(t)),
        }
    }

    fn fetch_salt(&self, email: &str) -> Result<[u8; SALT_LEN]> {
        let resp = match self
            .agent
            .post(&self.url("/get-salt"))
            .send_json(&SaltRequest { email })
        {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, _)) if (400..500).contains(&code) => {
                return Err(VaultError::UnknownAccount(email.to_string()));
            }
            Err(ureq::Error::Status(code, _)) => {
                return Err(VaultError::NetworkFailure(format!("get-salt: HTTP {code}")));
            }
            Err(ureq::Error::Transport(t)) => return Err(transport_err(t)),
        };

        let body: SaltResponse = read_json(resp)?;
        wire::decode_fixed("kdf_salt", &body.kdf_salt)
    }

    fn login(&self, email: &str, auth_key: &[u8; AUTH_KEY_LEN]) -> Result<LoginGrant> {
        let req = LoginRequest {
            email,
            auth_key: wire::encode_bytes(auth_key),
        };

        let resp = match self.agent.post(&self.url("/login")).send_json(&req) {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, _)) if (400..500).contains(&code) => {
                return Err(VaultError::InvalidCredentials);
            }
            Err(ureq::Error::Status(code, _)) => {
                return Err(VaultError::NetworkFailure(format!("login: HTTP {code}")));
            }
            Err(ureq::Error::Transport(t)) => return Err(transport_err(t)),
        };

        let body: LoginResponse = read_json(resp)?;
        Ok(LoginGrant {
            token: SessionToken::new(body.token),
            wrapped_vault_key: wire::decode_bytes("encrypted_vault_key", &body.encrypted_vault_key)?,
            wrap_nonce: wire::decode_fixed("vault_key_iv", &body.vault_key_iv)?,
        })
    }

    fn list_items(&self, token: &SessionToken) -> Result<Vec<CipherRecord>> {
        let resp = self
            .agent
            .get(&self.url("/vault"))
            .set("Authorization", &Self::bearer(token))
            .call()
            .map_err(|e| VaultError::NetworkFailure(format!("list items: {e}")))?;

        let records: Vec<ItemRecord> = read_json(resp)?;
        records
            .into_iter()
            .map(|r| {
                Ok(CipherRecord {
                    ciphertext: wire::decode_bytes("encrypted_data", &r.encrypted_data)?,
                    nonce: wire::decode_fixed("iv", &r.iv)?,
                    id: r.id,
                })
            })
            .collect()
    }

    fn create_item(
        &self,
        token: &SessionToken,
        ciphertext: &[u8],
        nonce: &[u8; NONCE_LEN],
    ) -> Result<String> {
        let payload = ItemPayload {
            encrypted_data: wire::encode_bytes(ciphertext),
            iv: wire::encode_bytes(nonce),
        };

        let resp = self
            .agent
            .post(&self.url("/vault"))
            .set("Authorization", &Self::bearer(token))
            .send_json(&payload)
            .map_err(|e| VaultError::NetworkFailure(format!("create item: {e}")))?;

        let body: CreatedResponse = read_json(resp)?;
        Ok(body.id)
    }

    fn update_item(
        &self,
        token: &SessionToken,
        id: &str,
        ciphertext: &[u8],
        nonce: &[u8; NONCE_LEN],
    ) -> Result<()> {
        let payload = ItemPayload {
            encrypted_data: wire::encode_bytes(ciphertext),
            iv: wire::encode_bytes(nonce),
        };

        self.agent
            .put(&self.url(&format!("/vault/{id}")))
            .set("Authorization", &Self::bearer(token))
            .send_json(&payload)
            .map_err(|e| VaultError::NetworkFailure(format!("update item: {e}")))?;

        Ok(())
    }

    fn delete_item(&self, token: &SessionToken, id: &str) -> Result<()> {
        self.agent
            .delete(&self.url(&format!("/vault/{id}")))
            .set("Authorization", &Self::bearer(token))
            .call()
            .map_err(|e| VaultError::NetworkFailure(format!("delete item: {e}")))?;

        Ok(())
    }
}
