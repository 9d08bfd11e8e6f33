//! Cryptographic constants.
//!
//! The fingerprint defaults are persisted implicitly: every stored account
//! fingerprint was derived with them. Changing a default orphans existing
//! accounts.

/// Default PBKDF2 iteration count for address fingerprints
pub const FINGERPRINT_ITERATIONS: u32 = 10_000;

/// Default PBKDF2 output length in bytes for address fingerprints
pub const FINGERPRINT_OUTPUT_SIZE: usize = 24;

/// Size of a freshly generated fingerprint salt in bytes
pub const SALT_SIZE: usize = 32;

/// Minimum accepted size of the HMAC token signing key in bytes
pub const MIN_SIGNING_KEY_SIZE: usize = 32;

/// Session token lifetime in seconds (24 hours)
pub const SESSION_TOKEN_EXPIRY_SECONDS: u64 = 86_400;

/// Longest session token lifetime accepted from configuration (one year)
pub const MAX_SESSION_TOKEN_LIFETIME_SECONDS: u64 = 365 * 86_400;

/// How much earlier than the real expiry clients are told to refresh (5 minutes)
pub const SESSION_TOKEN_REFRESH_MARGIN_SECONDS: u64 = 300;

/// Length of the hex tag used in place of fingerprints in log output
pub const LOG_TAG_SIZE: usize = 8;
