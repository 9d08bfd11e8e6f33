//! # pal-accounts
//!
//! Anonymous account provisioning.
//!
//! Accounts are keyed by a fingerprint of the client address. This crate is
//! responsible for:
//! - Loading and caching the process-wide fingerprint salt
//! - Deriving fingerprints for resolved client addresses
//! - Converging concurrent first requests on a single account

#![warn(clippy::all)]

pub mod errors;
pub mod salt;
pub mod service;
pub mod traits;
pub mod types;

pub use errors::{AccountError, Result};
pub use salt::{seed_salt, SaltProvider};
pub use service::AccountService;
pub use traits::AccountStore;
pub use types::*;
