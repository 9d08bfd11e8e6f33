//! Account error types.

use thiserror::Error;
use uuid::Uuid;

/// Account provisioning errors
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account not found
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// A required global setting is absent from storage
    #[error("Configuration missing: global setting '{0}' not found")]
    ConfigurationMissing(String),

    /// A global setting exists but cannot be used
    #[error("Invalid global setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// A concurrent request inserted the same fingerprint first
    #[error("Fingerprint already claimed by a concurrent request")]
    FingerprintConflict,

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] pal_storage::StorageError),

    /// Cryptographic error
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] pal_crypto::CryptoError),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type for account operations
pub type Result<T> = std::result::Result<T, AccountError>;
