mod common;

use axum::{body::Body, http::StatusCode};
use common::*;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test]
async fn test_create_account_direct_peer() {
    let app = spawn_app(true).await;

    let body = app.create_account_from("203.0.113.7").await;

    assert_eq!(body["success"], true);
    let account_id = body["account_id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(account_id).is_ok());
}

#[tokio::test]
async fn test_create_account_is_idempotent_per_address() {
    let app = spawn_app(true).await;

    let first = app.create_account_from("203.0.113.7").await;
    let second = app.create_account_from("203.0.113.7").await;
    let other = app.create_account_from("203.0.113.8").await;

    assert_eq!(first["account_id"], second["account_id"]);
    assert_ne!(first["account_id"], other["account_id"]);
}

#[tokio::test]
async fn test_trusted_proxy_forwards_real_ip() {
    let app = spawn_app(true).await;

    let direct = app.create_account_from("203.0.113.7").await;

    let req = request("POST", "/v1/account", peer("127.0.0.1"))
        .header("x-real-ip", "203.0.113.7")
        .body(Body::empty())
        .unwrap();
    let (status, proxied) = app.send(req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(proxied["success"], true);
    assert_eq!(proxied["account_id"], direct["account_id"]);
}

#[tokio::test]
async fn test_dual_stack_loopback_proxy_forwards_real_ip() {
    let app = spawn_app(true).await;

    let direct = app.create_account_from("203.0.113.7").await;

    let req = request("POST", "/v1/account", peer("::ffff:127.0.0.1"))
        .header("x-real-ip", "203.0.113.7")
        .body(Body::empty())
        .unwrap();
    let (status, proxied) = app.send(req).await;
    let mapped = app.create_account_from("::ffff:203.0.113.7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(proxied["account_id"], direct["account_id"]);
    assert_eq!(mapped["account_id"], direct["account_id"]);
}

#[tokio::test]
async fn test_trusted_proxy_without_header_fails() {
    let app = spawn_app(true).await;

    let body = app.create_account_from("127.0.0.1").await;

    assert_eq!(body["success"], false);
    assert!(body.get("account_id").is_none());
}

#[tokio::test]
async fn test_trusted_proxy_with_garbage_header_fails() {
    let app = spawn_app(true).await;

    let req = request("POST", "/v1/account", peer("127.0.0.1"))
        .header("x-real-ip", "definitely-not-an-ip")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_untrusted_peer_cannot_spoof_address() {
    let app = spawn_app(true).await;

    let victim = app.create_account_from("198.51.100.1").await;

    let req = request("POST", "/v1/account", peer("203.0.113.7"))
        .header("x-real-ip", "198.51.100.1")
        .body(Body::empty())
        .unwrap();
    let (_, spoofed) = app.send(req).await;

    assert_eq!(spoofed["success"], true);
    assert_ne!(spoofed["account_id"], victim["account_id"]);
}

#[tokio::test]
async fn test_create_account_without_salt_fails() {
    let app = spawn_app(false).await;

    let body = app.create_account_from("203.0.113.7").await;

    assert_eq!(body["success"], false);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_creation_converges() {
    let app = Arc::new(spawn_app(true).await);

    let mut handles = Vec::new();
    for _ in 0..12 {
        let app = Arc::clone(&app);
        handles.push(tokio::spawn(async move {
            app.create_account_from("192.0.2.55").await
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let body = handle.await.unwrap();
        if body["success"] == true {
            ids.insert(body["account_id"].as_str().unwrap().to_string());
        }
    }
    assert_eq!(ids.len(), 1);

    let after = app.create_account_from("192.0.2.55").await;
    assert!(ids.contains(after["account_id"].as_str().unwrap()));
}

#[tokio::test]
async fn test_login_and_verify() {
    let app = spawn_app(true).await;
    let created = app.create_account_from("203.0.113.7").await;
    let account_id = created["account_id"].as_str().unwrap();

    let login = app.login(account_id).await;

    assert_eq!(login["success"], true);
    assert!(login.get("error").is_none());
    let token = login["auth_token"].as_str().unwrap();
    let expires_at =
        chrono::DateTime::parse_from_rfc3339(login["expires_at"].as_str().unwrap()).unwrap();
    let remaining = expires_at.timestamp() - chrono::Utc::now().timestamp();
    assert!(remaining > 86_400 - 300 - 60 && remaining <= 86_400 - 300);

    let (status, body) = app.verify(Some(&format!("Bearer {}", token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({}));
}

#[tokio::test]
async fn test_login_malformed_account_id() {
    let app = spawn_app(true).await;

    let body = app.login("not-a-uuid").await;

    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_account_id");
    assert!(body.get("auth_token").is_none());
}

#[tokio::test]
async fn test_login_padded_account_id_rejected() {
    let app = spawn_app(true).await;
    let created = app.create_account_from("203.0.113.7").await;
    let account_id = created["account_id"].as_str().unwrap();

    let body = app.login(&format!(" {} ", account_id)).await;

    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_account_id");
}

#[tokio::test]
async fn test_login_unknown_account() {
    let app = spawn_app(true).await;

    let body = app.login(&uuid::Uuid::new_v4().to_string()).await;

    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_account_id");
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = spawn_app(true).await;

    let req = request("POST", "/v1/account/login", peer("203.0.113.7"))
        .header("content-type", "application/json")
        .body(Body::from("{\"account\":"))
        .unwrap();
    let (status, body) = app.send(req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_account_id");
}

#[tokio::test]
async fn test_verify_requires_token() {
    let app = spawn_app(true).await;

    let (status, body) = app.verify(None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = app.verify(Some("Basic dXNlcjpwYXNz")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.verify(Some("Bearer not.a.token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_rejects_token_from_other_key() {
    let app = spawn_app(true).await;
    let created = app.create_account_from("203.0.113.7").await;
    let token = app.login(created["account_id"].as_str().unwrap()).await["auth_token"]
        .as_str()
        .unwrap()
        .to_string();

    let mut config = app.state.config.clone();
    config.jwt_key = zeroize::Zeroizing::new(b"a-completely-different-signing-key!!".to_vec());
    let foreign = pal_server::AppState::with_storage(config, Arc::clone(&app.state.storage))
        .await
        .unwrap();
    let foreign_router = pal_server::create_router(Arc::new(foreign));

    let req = request("POST", "/v1/account/verify", peer("203.0.113.7"))
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(foreign_router, req).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
