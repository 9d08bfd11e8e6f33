//! Session token service implementation.

mod tokens;

use crate::{errors::*, traits::*, types::*};
use async_trait::async_trait;
use jsonwebtoken::{DecodingKey, EncodingKey};
use pal_accounts::{AccountError, AccountStore};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Issues and verifies HS256 session tokens
pub struct SessionService<A: AccountStore + ?Sized> {
    pub(super) accounts: Arc<A>,
    pub(super) issuer: String,
    pub(super) audience: Vec<String>,
    pub(super) lifetimes: TokenLifetimes,
    pub(super) encoding_key: EncodingKey,
    pub(super) decoding_key: DecodingKey,
}

impl<A: AccountStore + ?Sized> SessionService<A> {
    /// Create a session service with default token lifetimes
    pub fn new(accounts: Arc<A>, signing_key: &[u8], issuer: String, audience: String) -> Result<Self> {
        Self::with_lifetimes(accounts, signing_key, issuer, audience, TokenLifetimes::default())
    }

    /// Create a session service with explicit token lifetimes
    pub fn with_lifetimes(
        accounts: Arc<A>,
        signing_key: &[u8],
        issuer: String,
        audience: String,
        lifetimes: TokenLifetimes,
    ) -> Result<Self> {
        if signing_key.len() < pal_crypto::MIN_SIGNING_KEY_SIZE {
            return Err(SessionError::InvalidKey(format!(
                "expected at least {} bytes, got {}",
                pal_crypto::MIN_SIGNING_KEY_SIZE,
                signing_key.len()
            )));
        }
        if lifetimes.token_ttl <= lifetimes.refresh_margin {
            return Err(SessionError::InvalidLifetime(
                "token lifetime must exceed the refresh margin".to_string(),
            ));
        }
        if lifetimes.token_ttl > pal_crypto::MAX_SESSION_TOKEN_LIFETIME_SECONDS {
            return Err(SessionError::InvalidLifetime(format!(
                "token lifetime must not exceed {} seconds",
                pal_crypto::MAX_SESSION_TOKEN_LIFETIME_SECONDS
            )));
        }

        Ok(Self {
            accounts,
            issuer,
            audience: vec![audience],
            lifetimes,
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
        })
    }

    /// Token lifetimes in effect
    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }
}

#[async_trait]
impl<A: AccountStore + ?Sized> SessionManager for SessionService<A> {
    async fn issue_token(&self, account_id: &str) -> Result<IssuedToken> {
        let account_id = Uuid::parse_str(account_id).map_err(|_| {
            warn!("Login rejected: malformed account id");
            SessionError::InvalidAccountId
        })?;

        let account = match self.accounts.get_account(account_id).await {
            Ok(account) => account,
            Err(AccountError::NotFound(_)) => {
                warn!(account_id = %account_id, "Login rejected: unknown account");
                return Err(SessionError::InvalidAccountId);
            }
            Err(e) => return Err(e.into()),
        };

        let claims = self.build_token_claims(account.account_id);
        let token = self.sign_jwt(&claims)?;

        info!(account_id = %account.account_id, exp = claims.exp, "Session token issued");

        Ok(IssuedToken {
            token,
            expires_at: claims.exp - self.lifetimes.refresh_margin,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<Uuid> {
        let claims = self.verify_jwt_internal(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| SessionError::InvalidToken)
    }
}
