//! Error types for the dashboard server
//!
//! Provides unified error handling using thiserror. Every variant renders as
//! a JSON `{"error": ...}` body with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Body sent for transport and parse failures; the cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

// == Api Error Enum ==
/// Unified error type for the dashboard server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Caller omitted a required parameter
    #[error("{0}")]
    BadRequest(String),

    /// Photo API credential is not configured
    #[error("Unsplash access key not configured")]
    MissingCredential,

    /// Weather API key is not configured
    #[error("API key not configured")]
    MissingWeatherKey,

    /// Photo API headroom is exhausted and nothing was cached
    #[error("Rate limit exceeded")]
    Throttled,

    /// Upstream answered with a non-success status, forwarded as-is
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: &'static str,
    },

    /// Transport or decoding failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status this error is surfaced with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingCredential | ApiError::MissingWeatherKey => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Throttled => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::Internal(cause) => {
                error!("request failed: {}", cause);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the dashboard server.
pub type Result<T> = std::result::Result<T, ApiError>;
