//! # Diary Entry
//!
//! The persisted diary record and its mutation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored diary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    /// Store-assigned identifier
    pub id: i64,

    pub title: String,

    pub content: String,

    /// Write-once
    pub author: String,

    /// When the entry was created
    pub created_at: DateTime<Utc>,

    /// When title or content last changed
    pub updated_at: DateTime<Utc>,
}

impl DiaryEntry {
    /// Replace the title and refresh `updated_at`
    pub fn update_title(&mut self, title: String, now: DateTime<Utc>) {
        self.title = title;
        self.touch(now);
    }

    /// Replace the content and refresh `updated_at`
    pub fn update_content(&mut self, content: String, now: DateTime<Utc>) {
        self.content = content;
        self.touch(now);
    }

    // updated_at never precedes created_at
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}

/// An entry that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiaryEntry {
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewDiaryEntry {
    /// Both timestamps are taken from the same instant
    pub fn new(title: String, content: String, author: String, now: DateTime<Utc>) -> Self {
        Self {
            title,
            content,
            author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the identifier assigned by the store
    pub fn with_id(self, id: i64) -> DiaryEntry {
        DiaryEntry {
            id,
            title: self.title,
            content: self.content,
            author: self.author,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
