//! # HTTP API Errors
//!
//! Maps diary and extractor failures onto status codes and JSON bodies.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::diary::{DiaryError, FieldError};

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error raised by the diary service
    #[error("{0}")]
    Diary(#[from] DiaryError),

    /// Request body is not valid JSON for the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path parameter could not be parsed
    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    /// Query string is missing a parameter or malformed
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Diary(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let fields = match &self {
            // Not found carries no body
            ApiError::Diary(DiaryError::NotFound(id)) => {
                warn!(id = *id, "diary not found");
                return status.into_response();
            }
            ApiError::Diary(DiaryError::Storage(msg)) => {
                error!(error = %msg, "storage failure");
                Vec::new()
            }
            ApiError::Diary(DiaryError::Validation(fields)) => fields.clone(),
            other => {
                warn!(error = %other, "rejected request");
                Vec::new()
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
            fields,
        };
        (status, Json(body)).into_response()
    }
}
