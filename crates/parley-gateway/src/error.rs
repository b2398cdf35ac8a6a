//! Gateway error types and JSON error response formatting.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use parley_backend::BackendError;

/// Errors from the translation gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Extraction and translation disagree on how many strings are in
    /// flight. Splicing anything at this point would misplace text from the
    /// first divergent block onward, so the whole remap is abandoned.
    #[error("fragment count mismatch: extracted {extracted}, translated {translated}")]
    FragmentMismatch { extracted: usize, translated: usize },

    /// A recorded fragment coordinate no longer matches the block list
    /// being spliced.
    #[error("splice desynchronized at block {block}, sub-index {sub}")]
    SpliceDesync { block: usize, sub: usize },
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "bad_request", "bad_upstream").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - missing or invalid parameters.
    BadRequest(String),
    /// 502 Bad Gateway - a backend call failed or returned garbage.
    BadUpstream(String),
    /// 500 Internal Server Error - unexpected server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::BadUpstream(msg) => (StatusCode::BAD_GATEWAY, "bad_upstream", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<GatewayError> for parley_core::ParleyError {
    fn from(err: GatewayError) -> Self {
        parley_core::ParleyError::Gateway(err.to_string())
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match &err {
            GatewayError::Backend(_) => ApiError::BadUpstream(err.to_string()),
            GatewayError::FragmentMismatch { .. } | GatewayError::SpliceDesync { .. } => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}
