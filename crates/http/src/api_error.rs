//! Typed API error for HTTP handlers.
//!
//! Converts ledger errors into HTTP responses with a JSON body and status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cloud_hunter_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`.
///
/// `Internal` logs the real error server-side and returns a static message
/// to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400: unusable upload or malformed parameter.
    BadRequest(String),
    /// 404: no such observation.
    NotFound(String),
    /// 422: picture classified, but it is not sky.
    UnprocessableEntity(String),
    /// 428: destructive action without confirmation.
    PreconditionRequired(String),
    /// 429: classifier quota exhausted.
    TooManyRequests(String),
    /// 503: classifier unreachable or failing.
    ServiceUnavailable(String),
    /// 500: unexpected failure. Details logged, not exposed.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Self::PreconditionRequired(msg) => (StatusCode::PRECONDITION_REQUIRED, msg),
            Self::TooManyRequests(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let message = err.user_message();
        match err {
            ServiceError::InputRejected(ref detail) => {
                tracing::info!(%detail, "Upload rejected");
                Self::BadRequest(message)
            },
            ServiceError::NotCloudContent => Self::UnprocessableEntity(message),
            ServiceError::ClassificationUnavailable { rate_limited, ref reason } => {
                tracing::warn!(%reason, rate_limited, "Classification unavailable");
                if rate_limited { Self::TooManyRequests(message) } else { Self::ServiceUnavailable(message) }
            },
            ref e if e.is_not_found() => Self::NotFound(message),
            other => Self::Internal(other.to_string()),
        }
    }
}
