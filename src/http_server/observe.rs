//! Request logging middleware

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

use crate::observability::Logger;

/// Log method, path, status and latency of every request
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = started.elapsed().as_millis().to_string();
    let fields = [
        ("method", method.as_str()),
        ("path", path.as_str()),
        ("status", status.as_str()),
        ("duration_ms", duration_ms.as_str()),
    ];
    if status.is_server_error() {
        Logger::error("HTTP_REQUEST", &fields);
    } else {
        Logger::info("HTTP_REQUEST", &fields);
    }

    response
}
