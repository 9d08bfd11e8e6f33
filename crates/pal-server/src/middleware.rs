use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    middleware::Next,
};
use std::time::Instant;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Request ID middleware for request tracking and logging
///
/// Reuses an incoming `X-Request-ID` or generates one, echoes it on the
/// response, and logs start and completion with timing. Client addresses
/// stay out of request logs.
pub async fn request_id_middleware(
    mut req: Request<Body>,
    next: Next,
) -> Result<Response<Body>, StatusCode> {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    if let Ok(header_value) = request_id.parse() {
        req.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    } else {
        tracing::warn!("Failed to create header value for request ID");
    }

    tracing::info!(
        request_id = %request_id,
        method = %req.method(),
        uri = %req.uri(),
        "Request started"
    );

    let start = Instant::now();
    let mut response = next.run(req).await;
    let elapsed = start.elapsed();

    if let Ok(header_value) = request_id.parse() {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        elapsed_ms = elapsed.as_millis(),
        "Request completed"
    );

    Ok(response)
}
