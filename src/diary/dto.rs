//! # Diary Request/Response Types
//!
//! Transport-facing shapes and their field validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::DiaryEntry;
use super::errors::{DiaryError, DiaryResult, FieldError};

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_AUTHOR_CHARS: usize = 50;
/// Only enforced on update.
pub const MAX_UPDATE_CONTENT_CHARS: usize = 1000;

/// Diary as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DiaryEntry> for DiaryResponse {
    fn from(entry: DiaryEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            content: entry.content,
            author: entry.author,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Diary creation request
///
/// Fields are optional on the wire so that a missing field is reported
/// as a validation failure rather than a body parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDiaryRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// A creation request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDiary {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl CreateDiaryRequest {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            author: Some(author.into()),
        }
    }

    /// Check every field and collect all violations
    pub fn validate(self) -> DiaryResult<CreateDiary> {
        let mut errors = Vec::new();

        require_not_blank(&mut errors, "title", self.title.as_deref());
        check_max_chars(&mut errors, "title", self.title.as_deref(), MAX_TITLE_CHARS);
        require_not_blank(&mut errors, "content", self.content.as_deref());
        require_not_blank(&mut errors, "author", self.author.as_deref());
        check_max_chars(&mut errors, "author", self.author.as_deref(), MAX_AUTHOR_CHARS);

        match (self.title, self.content, self.author) {
            (Some(title), Some(content), Some(author)) if errors.is_empty() => Ok(CreateDiary {
                title,
                content,
                author,
            }),
            _ => Err(DiaryError::Validation(errors)),
        }
    }
}

/// Partial diary update request
///
/// `author` is not part of this shape and is ignored if sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDiaryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdateDiaryRequest {
    pub fn validate(&self) -> DiaryResult<()> {
        let mut errors = Vec::new();

        check_max_chars(&mut errors, "title", self.title.as_deref(), MAX_TITLE_CHARS);
        check_max_chars(
            &mut errors,
            "content",
            self.content.as_deref(),
            MAX_UPDATE_CONTENT_CHARS,
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DiaryError::Validation(errors))
        }
    }
}

fn require_not_blank(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        errors.push(FieldError::new(field, format!("{} must not be blank", field)));
    }
}

// Limits count characters, not bytes.
fn check_max_chars(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>, max: usize) {
    if let Some(v) = value {
        if v.chars().count() > max {
            errors.push(FieldError::new(
                field,
                format!("{} must be at most {} characters", field, max),
            ));
        }
    }
}
