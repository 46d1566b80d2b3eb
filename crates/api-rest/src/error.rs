//! Error envelope and HTTP status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use reviewpulse_feedback::SubmitError;
use reviewpulse_storage::StorageError;

/// Uniform JSON error body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable detail
    pub message: String,
    /// Offending field for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    /// Create an error body
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            field: None,
        }
    }

    /// Attach the offending field name
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// API error, mapped onto HTTP statuses by `IntoResponse`
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed validation
    #[error("{field}: {message}")]
    Validation {
        /// Offending field name
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// Missing or wrong admin API key
    #[error("Invalid or missing API key")]
    Unauthorized,

    /// Client exceeded its request budget
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Handler did not finish within the request timeout
    #[error("Request timed out")]
    Timeout,

    /// Storage failure with no fallback
    #[error("Storage operation failed")]
    Storage(#[source] StorageError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::Unauthorized => "unauthorized",
            ApiError::RateLimited => "rate_limited",
            ApiError::Timeout => "timeout",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(source) = &self {
            tracing::error!(error = %source, "Storage failure surfaced to client");
        }

        let body = match &self {
            ApiError::Validation { field, message } => {
                ErrorResponse::new(self.code(), message.clone()).with_field(field.clone())
            }
            _ => ErrorResponse::new(self.code(), self.to_string()),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation { field, message } => ApiError::Validation {
                field: field.to_string(),
                message,
            },
            SubmitError::Storage(source) => ApiError::Storage(source),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation = ApiError::Validation {
            field: "rating".to_string(),
            message: "out of range".to_string(),
        };
        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(ApiError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_validation_body_carries_field() {
        let err = ApiError::Validation {
            field: "review".to_string(),
            message: "cannot be empty".to_string(),
        };
        let body = ErrorResponse::new(err.code(), "cannot be empty").with_field("review");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["field"], "review");
    }

    #[test]
    fn test_unauthorized_body_has_no_field() {
        let body = ErrorResponse::new("unauthorized", "Invalid or missing API key");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("field").is_none());
    }
}
