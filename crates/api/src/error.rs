use audit_trail_core::error::CoreError;
use audit_trail_db::store::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for client-facing domain errors and [`StoreError`]
/// for persistence failures. Implements [`IntoResponse`] to produce
/// consistent JSON error bodies of the form
/// `{"error": ..., "code": ..., "message"?: ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `audit_trail_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence failure. Always reported as a 500.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body exceeded the configured size limit.
    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::InvalidPayload(detail) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_PAYLOAD",
                    core.to_string(),
                    Some(detail.clone()),
                ),
                CoreError::MissingField { .. } => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_FIELD",
                    core.to_string(),
                    None,
                ),
                CoreError::Validation { field, reason } => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Invalid field value".to_string(),
                    Some(format!("{field} {reason}")),
                ),
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string(), None)
                }
                CoreError::Unexpected(detail) => {
                    tracing::error!(error = %detail, "Unexpected error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UNEXPECTED_ERROR",
                        "An unexpected error occurred".to_string(),
                        None,
                    )
                }
            },

            AppError::Store(err) => {
                tracing::error!(error = %err, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Database error".to_string(),
                    None,
                )
            }

            AppError::PayloadTooLarge(detail) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Request body too large".to_string(),
                Some(detail.clone()),
            ),

            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                self.to_string(),
                None,
            ),
        };

        let mut body = json!({
            "error": error,
            "code": code,
        });
        if let Some(message) = message {
            body["message"] = json!(message);
        }

        (status, axum::Json(body)).into_response()
    }
}
