//! Address fingerprint derivation.
//!
//! A fingerprint is the natural key used to deduplicate accounts. It is
//! derived from the raw octets of the client address with PBKDF2, using the
//! process-wide salt, and encoded as standard (padded) base64.

use crate::{constants::*, errors::*};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use zeroize::Zeroizing;

/// HMAC pseudo-random function used inside PBKDF2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FingerprintPrf {
    /// HMAC-SHA1, the PRF every existing fingerprint was derived with
    #[default]
    HmacSha1,
    /// HMAC-SHA256
    HmacSha256,
}

impl FromStr for FingerprintPrf {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" | "hmac-sha1" => Ok(FingerprintPrf::HmacSha1),
            "sha256" | "hmac-sha256" => Ok(FingerprintPrf::HmacSha256),
            other => Err(CryptoError::UnknownPrf(other.to_string())),
        }
    }
}

impl fmt::Display for FingerprintPrf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FingerprintPrf::HmacSha1 => write!(f, "hmac-sha1"),
            FingerprintPrf::HmacSha256 => write!(f, "hmac-sha256"),
        }
    }
}

/// Tunable PBKDF2 parameters for fingerprint derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerprintParams {
    /// HMAC PRF
    pub prf: FingerprintPrf,
    /// PBKDF2 iteration count
    pub iterations: u32,
    /// Number of derived bytes before base64 encoding
    pub output_len: usize,
}

impl Default for FingerprintParams {
    fn default() -> Self {
        Self {
            prf: FingerprintPrf::default(),
            iterations: FINGERPRINT_ITERATIONS,
            output_len: FINGERPRINT_OUTPUT_SIZE,
        }
    }
}

impl FingerprintParams {
    fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(CryptoError::InvalidInput(
                "PBKDF2 iteration count must be positive".to_string(),
            ));
        }
        if self.output_len == 0 {
            return Err(CryptoError::InvalidInput(
                "Fingerprint output length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Derive a fingerprint from arbitrary address bytes
///
/// # Arguments
///
/// * `address` - Raw address octets, used as the PBKDF2 password
/// * `salt` - Process-wide salt
/// * `params` - PRF, iteration count and output length
///
/// # Returns
///
/// Standard base64 encoding of the derived bytes. The same inputs always
/// produce the same string.
pub fn derive_fingerprint(address: &[u8], salt: &[u8], params: &FingerprintParams) -> Result<String> {
    params.validate()?;

    if address.is_empty() {
        return Err(CryptoError::InvalidInput("Address bytes are empty".to_string()));
    }

    let mut derived = Zeroizing::new(vec![0u8; params.output_len]);
    match params.prf {
        FingerprintPrf::HmacSha1 => {
            pbkdf2::pbkdf2_hmac::<sha1::Sha1>(address, salt, params.iterations, derived.as_mut_slice())
        }
        FingerprintPrf::HmacSha256 => {
            pbkdf2::pbkdf2_hmac::<sha2::Sha256>(address, salt, params.iterations, derived.as_mut_slice())
        }
    }

    Ok(STANDARD.encode(derived.as_slice()))
}

/// Derive the fingerprint of an IP address
///
/// IPv4 addresses contribute their 4 octets and IPv6 addresses their 16
/// octets. IPv4-mapped IPv6 addresses are not folded, so `::ffff:1.2.3.4`
/// and `1.2.3.4` yield different fingerprints.
pub fn fingerprint_ip(address: IpAddr, salt: &[u8], params: &FingerprintParams) -> Result<String> {
    match address {
        IpAddr::V4(v4) => derive_fingerprint(&v4.octets(), salt, params),
        IpAddr::V6(v6) => derive_fingerprint(&v6.octets(), salt, params),
    }
}
