//! # Diary Repository
//!
//! Storage abstraction for diary entries and the in-memory store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::entry::{DiaryEntry, NewDiaryEntry};
use super::errors::{DiaryError, DiaryResult};

/// Diary repository trait
///
/// Abstracts storage operations for diary entries.
pub trait DiaryRepository: Send + Sync {
    /// Insert a new entry and return it with its assigned id
    fn save(&self, entry: NewDiaryEntry) -> DiaryResult<DiaryEntry>;

    /// Persist title, content and updated_at of an existing entry
    fn update(&self, entry: &DiaryEntry) -> DiaryResult<()>;

    /// Find an entry by its id
    fn find_by_id(&self, id: i64) -> DiaryResult<Option<DiaryEntry>>;

    /// All entries
    fn find_all(&self) -> DiaryResult<Vec<DiaryEntry>>;

    /// Entries whose author equals `author` exactly
    fn find_by_author(&self, author: &str) -> DiaryResult<Vec<DiaryEntry>>;

    /// Entries whose title contains `keyword`
    fn find_by_title_containing(&self, keyword: &str) -> DiaryResult<Vec<DiaryEntry>>;

    fn exists_by_id(&self, id: i64) -> DiaryResult<bool>;

    /// Remove an entry; missing ids are ignored
    fn delete_by_id(&self, id: i64) -> DiaryResult<()>;
}

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, DiaryEntry>,
}

/// In-memory diary repository
#[derive(Debug, Default)]
pub struct InMemoryDiaryRepository {
    table: RwLock<Table>,
}

impl InMemoryDiaryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DiaryResult<std::sync::RwLockReadGuard<'_, Table>> {
        self.table
            .read()
            .map_err(|_| DiaryError::Storage("Lock poisoned".to_string()))
    }

    fn write(&self) -> DiaryResult<std::sync::RwLockWriteGuard<'_, Table>> {
        self.table
            .write()
            .map_err(|_| DiaryError::Storage("Lock poisoned".to_string()))
    }

    fn select<F>(&self, predicate: F) -> DiaryResult<Vec<DiaryEntry>>
    where
        F: Fn(&DiaryEntry) -> bool,
    {
        let table = self.read()?;
        Ok(table
            .rows
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect())
    }
}

impl DiaryRepository for InMemoryDiaryRepository {
    fn save(&self, entry: NewDiaryEntry) -> DiaryResult<DiaryEntry> {
        let mut table = self.write()?;
        table.last_id += 1;
        let stored = entry.with_id(table.last_id);
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update(&self, entry: &DiaryEntry) -> DiaryResult<()> {
        let mut table = self.write()?;
        let existing = table
            .rows
            .get_mut(&entry.id)
            .ok_or(DiaryError::NotFound(entry.id))?;

        existing.title = entry.title.clone();
        existing.content = entry.content.clone();
        existing.updated_at = entry.updated_at;
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> DiaryResult<Option<DiaryEntry>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    fn find_all(&self) -> DiaryResult<Vec<DiaryEntry>> {
        self.select(|_| true)
    }

    fn find_by_author(&self, author: &str) -> DiaryResult<Vec<DiaryEntry>> {
        self.select(|e| e.author == author)
    }

    fn find_by_title_containing(&self, keyword: &str) -> DiaryResult<Vec<DiaryEntry>> {
        self.select(|e| e.title.contains(keyword))
    }

    fn exists_by_id(&self, id: i64) -> DiaryResult<bool> {
        Ok(self.read()?.rows.contains_key(&id))
    }

    fn delete_by_id(&self, id: i64) -> DiaryResult<()> {
        self.write()?.rows.remove(&id);
        Ok(())
    }
}
