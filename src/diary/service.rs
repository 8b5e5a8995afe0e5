//! # Diary Service
//!
//! Business operations over an injected repository and clock.

use std::sync::Arc;

use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::dto::{CreateDiary, DiaryResponse, UpdateDiaryRequest};
use super::entry::{DiaryEntry, NewDiaryEntry};
use super::errors::{DiaryError, DiaryResult};
use super::repository::DiaryRepository;

/// Diary service
#[derive(Clone)]
pub struct DiaryService {
    repository: Arc<dyn DiaryRepository>,
    clock: Arc<dyn Clock>,
}

impl DiaryService {
    /// Create a service that reads wall-clock time
    pub fn new(repository: Arc<dyn DiaryRepository>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<dyn DiaryRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Store a new entry; both timestamps share one instant
    pub fn create_diary(&self, request: CreateDiary) -> DiaryResult<DiaryResponse> {
        let entry = NewDiaryEntry::new(
            request.title,
            request.content,
            request.author,
            self.clock.now(),
        );
        let saved = self.repository.save(entry)?;
        info!(id = saved.id, author = %saved.author, "diary created");
        Ok(saved.into())
    }

    pub fn get_diary(&self, id: i64) -> DiaryResult<DiaryResponse> {
        debug!(id, "fetching diary");
        self.load(id).map(DiaryResponse::from)
    }

    pub fn get_all_diaries(&self) -> DiaryResult<Vec<DiaryResponse>> {
        let entries = self.repository.find_all()?;
        debug!(count = entries.len(), "listed diaries");
        Ok(entries.into_iter().map(DiaryResponse::from).collect())
    }

    /// Apply a partial update; author is never touched
    pub fn update_diary(&self, id: i64, request: UpdateDiaryRequest) -> DiaryResult<DiaryResponse> {
        let mut entry = self.load(id)?;

        if let Some(title) = request.title {
            entry.update_title(title, self.clock.now());
        }
        if let Some(content) = request.content {
            entry.update_content(content, self.clock.now());
        }

        self.repository.update(&entry)?;
        info!(id, "diary updated");
        Ok(entry.into())
    }

    pub fn delete_diary(&self, id: i64) -> DiaryResult<()> {
        if !self.repository.exists_by_id(id)? {
            return Err(DiaryError::NotFound(id));
        }
        self.repository.delete_by_id(id)?;
        info!(id, "diary deleted");
        Ok(())
    }

    pub fn get_diaries_by_author(&self, author: &str) -> DiaryResult<Vec<DiaryResponse>> {
        let entries = self.repository.find_by_author(author)?;
        debug!(author, count = entries.len(), "listed diaries by author");
        Ok(entries.into_iter().map(DiaryResponse::from).collect())
    }

    /// Entries whose title contains `keyword`
    pub fn search_diaries(&self, keyword: &str) -> DiaryResult<Vec<DiaryResponse>> {
        let entries = self.repository.find_by_title_containing(keyword)?;
        debug!(keyword, count = entries.len(), "searched diaries by title");
        Ok(entries.into_iter().map(DiaryResponse::from).collect())
    }

    fn load(&self, id: i64) -> DiaryResult<DiaryEntry> {
        self.repository
            .find_by_id(id)?
            .ok_or(DiaryError::NotFound(id))
    }
}
