//! # pal-crypto
//!
//! Cryptographic primitives for the pal account service.
//!
//! ## Security Properties
//!
//! - Client addresses are only ever handled as PBKDF2 input, never as output
//! - Intermediate key material is zeroized after encoding
//! - No unsafe code

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod errors;
pub mod fingerprint;
pub mod hashing;
pub mod utils;

pub use constants::*;
pub use errors::{CryptoError, Result};
pub use fingerprint::*;
pub use hashing::*;
pub use utils::*;
