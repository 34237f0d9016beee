use thiserror::Error;

/// All errors that can occur in ZeroVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication tag mismatch, ciphertext cannot be trusted")]
    AuthenticationFailed,

    #[error("Vault key unwrap failed: wrong password or tampered envelope")]
    DecryptionFailed,

    // --- Account errors ---
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No account registered for '{0}'")]
    UnknownAccount(String),

    #[error("An account already exists for '{0}'")]
    EmailAlreadyRegistered(String),

    // --- Item errors ---
    #[error("Item ciphertext failed authentication: entry is corrupted, not absent")]
    Undecryptable,

    #[error("No item with id '{0}' in this vault")]
    ItemNotFound(String),

    #[error("Item '{0}' must be moved to trash before permanent deletion")]
    NotInTrash(String),

    #[error("Item '{0}' is corrupted and cannot be modified")]
    ItemCorrupted(String),

    // --- Storage errors ---
    #[error("Storage request failed: {0}")]
    NetworkFailure(String),

    #[error("Malformed wire data: {0}")]
    WireFormat(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for ZeroVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
