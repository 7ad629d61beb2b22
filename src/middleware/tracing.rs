//! Request tracing middleware

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Log every request with its route template, status and latency.
///
/// The route template (`/api/reputation/:address/insights`) is logged rather
/// than the raw path so addresses do not end up in log aggregation keys.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let body_bytes = request
        .headers()
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());

    let start = Instant::now();
    tracing::debug!(method = %method, route = %route, body_bytes = ?body_bytes, "Request started");

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "Request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "Request rejected"
        );
    } else {
        tracing::info!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "Request completed"
        );
    }

    response
}
