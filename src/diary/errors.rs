//! # Diary Errors
//!
//! Error types for the diary module.

use serde::Serialize;
use thiserror::Error;

/// Result type for diary operations
pub type DiaryResult<T> = Result<T, DiaryError>;

/// A single rejected request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Diary errors
#[derive(Debug, Clone, Error)]
pub enum DiaryError {
    /// One or more request fields are malformed or out of bounds
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// No entry exists for the identifier
    #[error("Diary not found: {0}")]
    NotFound(i64),

    /// Store operation failed
    #[error("Storage error: {0}")]
    Storage(String),
}

fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl DiaryError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            DiaryError::Validation(_) => 400,
            DiaryError::NotFound(_) => 404,
            DiaryError::Storage(_) => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DiaryError::NotFound(_))
    }
}

impl From<rusqlite::Error> for DiaryError {
    fn from(e: rusqlite::Error) -> Self {
        DiaryError::Storage(e.to_string())
    }
}
