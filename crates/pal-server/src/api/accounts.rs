use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use pal_accounts::{AccountError, AccountStore};
use pal_sessions::{SessionError, SessionManager};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::helpers::format_timestamp_rfc3339,
    extractors::AuthenticatedAccount,
    request_context::RequestContext,
    state::AppState,
};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAccountResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
}

impl CreateAccountResponse {
    fn failed() -> Self {
        Self {
            success: false,
            account_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub account_id: String,
}

/// Reason a login was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginError {
    Unknown,
    InvalidAccountId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// RFC 3339; when the client should log in again
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<LoginError>,
}

impl LoginResponse {
    fn failed(error: LoginError) -> Self {
        Self {
            success: false,
            auth_token: None,
            expires_at: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/account
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Json<CreateAccountResponse> {
    let Some(client_ip) = ctx.client_ip else {
        tracing::warn!(user_agent = %ctx.user_agent, "Account creation rejected: no client address");
        return Json(CreateAccountResponse::failed());
    };

    match state.account_service.create_account(client_ip).await {
        Ok(provisioned) => Json(CreateAccountResponse {
            success: true,
            account_id: Some(provisioned.account.account_id),
        }),
        Err(AccountError::FingerprintConflict) => {
            tracing::warn!("Account creation lost a concurrent race");
            Json(CreateAccountResponse::failed())
        }
        Err(e @ (AccountError::ConfigurationMissing(_) | AccountError::InvalidSetting { .. })) => {
            tracing::error!("Account creation unavailable: {}", e);
            Json(CreateAccountResponse::failed())
        }
        Err(e) => {
            tracing::error!("Account creation failed: {}", e);
            Json(CreateAccountResponse::failed())
        }
    }
}

/// POST /v1/account/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Json<LoginResponse> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!("Login rejected: {}", rejection.body_text());
            return Json(LoginResponse::failed(LoginError::InvalidAccountId));
        }
    };

    let issued = match state.session_service.issue_token(&req.account_id).await {
        Ok(issued) => issued,
        Err(SessionError::InvalidAccountId) => {
            return Json(LoginResponse::failed(LoginError::InvalidAccountId));
        }
        Err(e) => {
            tracing::error!("Token issuance failed: {}", e);
            return Json(LoginResponse::failed(LoginError::Unknown));
        }
    };

    match format_timestamp_rfc3339(issued.expires_at) {
        Ok(expires_at) => Json(LoginResponse {
            success: true,
            auth_token: Some(issued.token),
            expires_at: Some(expires_at),
            error: None,
        }),
        Err(e) => {
            tracing::error!("Token issuance failed: {}", e);
            Json(LoginResponse::failed(LoginError::Unknown))
        }
    }
}

/// POST /v1/account/verify
pub async fn verify(account: AuthenticatedAccount) -> Json<VerifyResponse> {
    tracing::debug!(account_id = %account.account_id, "Token verified");
    Json(VerifyResponse {})
}
