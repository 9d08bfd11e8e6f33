use axum::{extract::State, http::StatusCode, response::Json};
use pal_accounts::AccountError;
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    status: &'static str,
    database: &'static str,
    salt: &'static str,
}

/// Readiness check endpoint
///
/// Not ready until the fingerprint salt can be loaded, since every account
/// creation fails without it.
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let (database, salt) = match state.salt.salt().await {
        Ok(_) => ("connected", "loaded"),
        Err(AccountError::Storage(e)) => {
            tracing::error!("Readiness check failed: {}", e);
            ("error", "unknown")
        }
        Err(AccountError::ConfigurationMissing(_)) => ("connected", "missing"),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            ("connected", "invalid")
        }
    };

    let ready = salt == "loaded";
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" },
            database,
            salt,
        }),
    )
}
