//! # pal-sessions
//!
//! Signed session tokens for pal accounts.
//!
//! Tokens are HS256 JWTs whose subject is the account id. They are never
//! stored; verification is signature, issuer, audience and time checks only.

#![warn(clippy::all)]

pub mod errors;
mod service;
pub mod traits;
pub mod types;


pub use errors::*;
pub use service::SessionService;
pub use traits::*;
pub use types::*;
