//! Error types for the joke API
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == API Error Enum ==
/// Unified error type for request handling.
///
/// Cache misses are not errors and never show up here.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Joke id unknown to the store
    #[error("{0}")]
    NotFound(String),

    /// Request body or parameters failed validation
    #[error("{0}")]
    Validation(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "type": "error",
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Extractor Rejections ==
/// Malformed JSON bodies are reported with the API's error body.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the joke API.
pub type Result<T> = std::result::Result<T, ApiError>;
