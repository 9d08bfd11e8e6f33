use serde::{Deserialize, Serialize};

/// JWT token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,      // Issuer
    pub sub: String,      // Subject (account_id)
    pub aud: Vec<String>, // Audience
    pub iat: u64,         // Issued at
    pub exp: u64,         // Expiration
    pub nbf: u64,         // Not before
    pub jti: String,      // JWT ID
}

/// Token handed back to a client after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    /// Unix seconds at which the client should log in again.
    /// Sits ahead of the token's `exp` by the refresh margin.
    pub expires_at: u64,
}

/// Lifetime and clock tolerance applied to tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    /// Seconds from issuance to `exp`
    pub token_ttl: u64,
    /// Seconds subtracted from `exp` when reporting `expires_at`
    pub refresh_margin: u64,
    /// Clock skew tolerated when checking `exp` and `nbf`
    pub leeway: u64,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            token_ttl: pal_crypto::SESSION_TOKEN_EXPIRY_SECONDS,
            refresh_margin: pal_crypto::SESSION_TOKEN_REFRESH_MARGIN_SECONDS,
            leeway: 60,
        }
    }
}

pub use pal_crypto::current_timestamp;
