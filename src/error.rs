//! Error types for the read-strategy service
//!
//! Provides unified error handling using thiserror.
//!
//! Cache engines never surface errors here: their failures collapse into
//! `Option`/`bool` returns so a cache problem can only cost latency. This
//! enum covers the HTTP boundary only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Service Error Enum ==
/// Unified error type for the HTTP boundary.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Key absent from the source-of-truth store
    #[error("Key not found in source store: {0}")]
    NotFound(String),

    /// Read strategy path segment not one of direct/ttl/lru
    #[error("Unknown read strategy: {0}")]
    UnknownStrategy(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::UnknownStrategy(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, ServiceError>;
