//! # pal-server
//!
//! HTTP surface for anonymous pal accounts: account creation keyed by the
//! caller's address, login, and token verification.

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod request_context;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub use config::{Config, TrustedProxies};
pub use state::AppState;

/// Build the application router
///
/// The router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`; without connection
/// info no client address can be resolved.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))

        // Accounts
        .route("/v1/account", post(api::accounts::create_account))
        .route("/v1/account/login", post(api::accounts::login))
        .route("/v1/account/verify", post(api::accounts::verify))

        // Add middleware
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
