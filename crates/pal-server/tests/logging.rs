mod common;

use axum::{body::Body, http::StatusCode};
use common::*;
use pal_crypto::log_tag;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Shared in-memory sink for formatted log lines
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_client_address_never_logged() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = spawn_app(true).await;
    let client = "203.0.113.7";

    let direct = app.create_account_from(client).await;
    assert_eq!(direct["success"], true);

    let req = request("POST", "/v1/account", peer("127.0.0.1"))
        .header("x-real-ip", client)
        .body(Body::empty())
        .unwrap();
    let (status, proxied) = app.send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(proxied["account_id"], direct["account_id"]);

    let output = logs.contents();
    assert!(output.contains("Request started"));
    assert!(output.contains("Returning existing account"));
    assert!(!output.contains(client));
    // An unkeyed digest of the address can be reversed by enumerating the
    // address space, so it must not appear either
    assert!(!output.contains(&log_tag(client)));
}
