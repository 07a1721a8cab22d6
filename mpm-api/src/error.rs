//! API error types and response mapping

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use mpm_common::messages::{format_field_errors, format_for_display};
use mpm_common::validation::FieldError;

use crate::api::Meta;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request content failed validation (400)
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    /// Malformed id or body (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// mpm-common error
    #[error("Common error: {0}")]
    Common(#[from] mpm_common::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: ErrorBody,
    meta: Meta,
}

impl ApiError {
    /// Fold common errors into the API variants
    fn normalize(self) -> Self {
        match self {
            ApiError::Common(mpm_common::Error::Validation(errors)) => ApiError::Validation(errors),
            ApiError::Common(mpm_common::Error::NotFound(what)) => ApiError::NotFound(what),
            ApiError::Common(mpm_common::Error::InvalidInput(msg)) => ApiError::BadRequest(msg),
            other => other,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, details, display) = match self.normalize() {
            ApiError::Validation(errors) => {
                warn!(?errors, "Request validation failed");
                let display = format_field_errors(&errors);
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    serde_json::to_value(&errors).ok(),
                    display,
                )
            }
            ApiError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    "BAD_REQUEST",
                    Some(Value::String(msg)),
                    format_for_display("BAD_REQUEST", None),
                )
            }
            ApiError::NotFound(what) => {
                debug!("Not found: {}", what);
                (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    None,
                    format_for_display("NOT_FOUND", None),
                )
            }
            // Cause is logged, never returned to the client
            err @ (ApiError::Internal(_) | ApiError::Common(_)) => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    None,
                    format_for_display("INTERNAL_ERROR", None),
                )
            }
        };

        let body = ErrorEnvelope {
            success: false,
            error: ErrorBody {
                code,
                message: display.message,
                details,
                explanation: display.explanation,
                suggestion: display.suggestion,
            },
            meta: Meta::now(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_errors_map_to_status() {
        let cases = [
            (
                ApiError::from(mpm_common::Error::Validation(vec![FieldError::new("lyrics", "x")])),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(mpm_common::Error::NotFound("prompt".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(mpm_common::Error::InvalidInput("bad".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(mpm_common::Error::Internal("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
