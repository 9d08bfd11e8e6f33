use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use pal_sessions::SessionManager;
use std::sync::Arc;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Extractor for requests carrying a valid session token
///
/// Rejects with `401` before the handler runs when the `Authorization`
/// header is missing, is not a Bearer token, or fails verification.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedAccount {
    pub account_id: Uuid,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let account_id = state
            .session_service
            .verify_token(token.trim())
            .await
            .map_err(|e| {
                tracing::warn!("Token verification failed: {}", e);
                ApiError::Unauthorized
            })?;

        Ok(AuthenticatedAccount { account_id })
    }
}
