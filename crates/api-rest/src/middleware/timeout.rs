//! Request timeout middleware

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use tracing::warn;

use crate::error::ApiError;

/// Abort handlers that outlive `timeout` with a 504 envelope
pub async fn request_timeout(request: Request, next: Next, timeout: Duration) -> Response {
    let path = request.uri().path().to_string();

    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(%path, ?timeout, "Request timed out");
            ApiError::Timeout.into_response()
        }
    }
}
