//! Common utility functions for pal cryptographic operations.

use crate::errors::{CryptoError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current Unix timestamp in seconds.
///
/// # Panics
///
/// Panics if the system time is set before the Unix epoch.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before Unix epoch")
        .as_secs()
}

/// Generate random bytes of the specified length
pub fn generate_random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Standard (padded) base64 encoding
pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Standard (padded) base64 decoding
pub fn base64_decode(data: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data.trim())
        .map_err(|e| CryptoError::DecodingFailed(e.to_string()))
}
