//! Error types for reeldraw-web
//!
//! Every failure leaving the service is a JSON envelope with a stable
//! machine-readable code and a short human-readable message. Upstream
//! detail stays in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reeldraw_common::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400), raised by the web layer itself
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Error from the sampling core; status derives from the error kind
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Core(err) => match err {
                CoreError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                CoreError::NoValidLists(_) => (StatusCode::NOT_FOUND, "NO_VALID_LISTS"),
                CoreError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE"),
                CoreError::ExtractionFailed(_) => (StatusCode::BAD_GATEWAY, "EXTRACTION_FAILED"),
                CoreError::Integrity(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTEGRITY_ERROR"),
                CoreError::Config(_) | CoreError::Io(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(code = error_code, %message, "request failed");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_their_statuses() {
        let cases = [
            (CoreError::InvalidInput("x".into()), StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            (CoreError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (CoreError::NoValidLists("x".into()), StatusCode::NOT_FOUND, "NO_VALID_LISTS"),
            (CoreError::Upstream("x".into()), StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE"),
            (CoreError::ExtractionFailed("x".into()), StatusCode::BAD_GATEWAY, "EXTRACTION_FAILED"),
            (CoreError::Integrity("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTEGRITY_ERROR"),
            (CoreError::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            let api_err = ApiError::from(err);
            assert_eq!(api_err.status_and_code(), (status, code));
        }
    }

    #[test]
    fn bad_request_is_a_plain_400() {
        let err = ApiError::BadRequest("No list URLs provided".to_string());
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "BAD_REQUEST"));
        assert_eq!(err.to_string(), "Invalid request: No list URLs provided");
    }
}
