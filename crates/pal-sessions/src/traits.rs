use crate::{IssuedToken, Result};
use async_trait::async_trait;
use uuid::Uuid;

/// Session token operations
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// Issue a token for an existing account
    ///
    /// `account_id` is the caller-supplied string form. A malformed id is
    /// rejected before any account lookup.
    async fn issue_token(&self, account_id: &str) -> Result<IssuedToken>;

    /// Verify a token and return the account it was issued to
    async fn verify_token(&self, token: &str) -> Result<Uuid>;
}
