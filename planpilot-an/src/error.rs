//! Error types for planpilot-an
//!
//! Validation failures become 400 with every offending field listed.
//! Anything that escapes validation is an internal fault (500).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use planpilot_common::FieldError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, wrong types or unknown fields (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Case submission failed validation (400)
    #[error("Invalid case input: {} field(s) rejected", .0.len())]
    InvalidCaseInput(Vec<FieldError>),

    /// planpilot-common error other than validation (500)
    #[error("Common error: {0}")]
    Common(planpilot_common::Error),
}

impl From<planpilot_common::Error> for ApiError {
    fn from(err: planpilot_common::Error) -> Self {
        match err {
            planpilot_common::Error::InvalidCaseInput(fields) => ApiError::InvalidCaseInput(fields),
            other => ApiError::Common(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, fields) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            ApiError::InvalidCaseInput(fields) => {
                let message = fields
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                (
                    StatusCode::BAD_REQUEST,
                    "INVALID_CASE_INPUT",
                    message,
                    Some(fields),
                )
            }
            ApiError::Common(ref err) => {
                // A comparator rejection here means validation let a bad value through
                error!("Unexpected analysis failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "COMMON_ERROR",
                    err.to_string(),
                    None,
                )
            }
        };

        let body = match fields {
            Some(fields) => json!({
                "error": {
                    "code": error_code,
                    "message": message,
                    "fields": fields,
                }
            }),
            None => json!({
                "error": {
                    "code": error_code,
                    "message": message,
                }
            }),
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
    fn test_validation_error_maps_to_bad_request() {
        let err: ApiError = planpilot_common::Error::InvalidCaseInput(vec![FieldError::new(
            "ai_minutes",
            "must be non-negative",
        )])
        .into();
        assert!(matches!(err, ApiError::InvalidCaseInput(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_metric_error_maps_to_internal() {
        let err: ApiError = planpilot_common::Error::InvalidMetricValue {
            metric: "ci".to_string(),
            reason: "AI value is not finite".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Common(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
