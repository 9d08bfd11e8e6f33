//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    Router,
};
use pal_accounts::seed_salt;
use pal_crypto::FingerprintParams;
use pal_server::{create_router, AppState, Config, TrustedProxies};
use pal_storage::RocksDbStorage;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use zeroize::Zeroizing;

pub const TEST_KEY: &[u8] = b"pal-server-test-key-0123456789abcdef";
pub const TEST_SALT: &[u8] = b"pal-server-test-salt";

/// Router plus the state and temporary database behind it
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        database_path: dir.path().join("pal.db"),
        jwt_key: Zeroizing::new(TEST_KEY.to_vec()),
        jwt_issuer: "pal-server.test".to_string(),
        jwt_audience: "pal-client.test".to_string(),
        token_lifetime: 86_400,
        trusted_proxies: TrustedProxies::Loopback,
        fingerprint: FingerprintParams {
            iterations: 10,
            ..FingerprintParams::default()
        },
    }
}

/// Start an app over a fresh database, optionally seeding the salt first
pub async fn spawn_app(with_salt: bool) -> TestApp {
    let (storage, dir) = RocksDbStorage::open_test().unwrap();
    let storage = Arc::new(storage);
    if with_salt {
        seed_salt(storage.as_ref(), TEST_SALT, false).await.unwrap();
    }

    let config = test_config(&dir);
    let state = Arc::new(AppState::with_storage(config, storage).await.unwrap());
    let router = create_router(Arc::clone(&state));

    TestApp {
        router,
        state,
        _dir: dir,
    }
}

pub fn peer(addr: &str) -> SocketAddr {
    SocketAddr::new(addr.parse().unwrap(), 40_000)
}

/// Build a request as if it arrived on a connection from `from`
pub fn request(method: &str, uri: &str, from: SocketAddr) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .extension(ConnectInfo(from))
}

impl TestApp {
    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = self.send_raw(req).await;
        (status, body)
    }

    pub async fn send_raw(&self, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, body)
    }

    /// POST /v1/account from a direct peer address
    pub async fn create_account_from(&self, addr: &str) -> Value {
        let req = request("POST", "/v1/account", peer(addr))
            .body(Body::empty())
            .unwrap();
        let (status, body) = self.send(req).await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    /// POST /v1/account/login with a raw account id string
    pub async fn login(&self, account_id: &str) -> Value {
        let payload = serde_json::json!({ "account_id": account_id });
        let req = request("POST", "/v1/account/login", peer("203.0.113.200"))
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = self.send(req).await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    /// POST /v1/account/verify with an optional Authorization header value
    pub async fn verify(&self, authorization: Option<&str>) -> (StatusCode, Value) {
        let mut builder = request("POST", "/v1/account/verify", peer("203.0.113.200"));
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}
