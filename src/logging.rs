//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// The number of characters of a request or response body to log at the
/// `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match read_body(body).await {
        Ok(body) => body,
        Err(error) => {
            tracing::warn!("Could not read request body: {error}");
            return Error::RequestBody(error.to_string()).into_response();
        }
    };

    log_body(
        &format!("Received request: {} {}", parts.method, parts.uri),
        &body,
    );

    let started = std::time::Instant::now();
    let response = next.run(Request::from_parts(parts, Body::from(body))).await;
    let latency = started.elapsed();

    let (parts, body) = response.into_parts();
    let body = match read_body(body).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return Error::ResponseBody(error.to_string()).into_response();
        }
    };

    log_body(
        &format!("Sending response: {} in {latency:?}", parts.status),
        &body,
    );

    Response::from_parts(parts, Body::from(body))
}

async fn read_body(body: Body) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, usize::MAX).await
}

fn log_body(summary: &str, body: &[u8]) {
    let text = String::from_utf8_lossy(body);

    match truncate(&text, LOG_BODY_LENGTH_LIMIT) {
        Some(truncated) => {
            tracing::info!("{summary}\nbody: {truncated}...");
            tracing::debug!("Full body: {text:?}");
        }
        None => tracing::info!("{summary}\nbody: {text:?}"),
    }
}

/// The first `limit` characters of `text`, or `None` if `text` is no longer
/// than `limit`.
fn truncate(text: &str, limit: usize) -> Option<&str> {
    text.char_indices()
        .nth(limit)
        .map(|(byte_index, _)| &text[..byte_index])
}
