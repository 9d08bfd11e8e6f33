//! Account type definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Global setting key holding the base64-encoded fingerprint salt
pub const SALT_SETTING_KEY: &str = "salt";

/// Account record
///
/// Created once per fingerprint and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: Uuid,
    /// Base64 fingerprint of the client address; unique across accounts
    pub fingerprint: String,
    pub created_at: u64,
}

/// Durable process-wide setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSetting {
    pub key: String,
    pub value: String,
}

/// Result of a provisioning request
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub account: Account,
    /// `true` when this request inserted the account
    pub created: bool,
}
