//! Hashing utilities using BLAKE3.

use crate::constants::LOG_TAG_SIZE;
use blake3::Hasher as Blake3Hasher;

/// Hash data using BLAKE3
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake3Hasher::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Short tag for a high-entropy value in log output
///
/// Only as hard to reverse as its input is to guess. Fingerprints are safe
/// to tag since they are salted; raw addresses are not, the address space is
/// small enough to enumerate.
pub fn log_tag(value: &str) -> String {
    let hash = blake3_hash(value.as_bytes());
    hex::encode(&hash[..LOG_TAG_SIZE])
}
