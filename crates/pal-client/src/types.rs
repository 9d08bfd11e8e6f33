/*!
 * Type definitions for the pal client
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account and session state kept between invocations
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountSession {
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// RFC 3339, as reported by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl AccountSession {
    pub fn new(account_id: Uuid) -> Self {
        Self {
            account_id,
            auth_token: None,
            expires_at: None,
        }
    }

    /// Whether the server-reported refresh time has passed
    pub fn needs_login(&self) -> bool {
        match self.expires_at.as_deref().map(chrono::DateTime::parse_from_rfc3339) {
            Some(Ok(expires_at)) => expires_at <= chrono::Utc::now(),
            _ => true,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CreateAccountResponse {
    pub success: bool,
    pub account_id: Option<Uuid>,
}

#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    pub success: bool,
    pub auth_token: Option<String>,
    pub expires_at: Option<String>,
    pub error: Option<String>,
}
