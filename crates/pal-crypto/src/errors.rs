//! Cryptographic error types.

use thiserror::Error;

/// Cryptographic operation errors
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid input data
    #[error("Invalid input data: {0}")]
    InvalidInput(String),

    /// Encoded value could not be decoded
    #[error("Decoding failed: {0}")]
    DecodingFailed(String),

    /// Unknown pseudo-random function name
    #[error("Unknown PRF: {0}")]
    UnknownPrf(String),
}

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, CryptoError>;
