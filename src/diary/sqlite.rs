//! SQLite-backed diary store.
//!
//! One `diary` table; the connection is serialized behind a mutex and every
//! repository call is a single statement.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::entry::{DiaryEntry, NewDiaryEntry};
use super::errors::{DiaryError, DiaryResult};
use super::repository::DiaryRepository;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS diary (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    author TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS diary_author ON diary(author);
"#;

const COLUMNS: &str = "id, title, content, author, created_at, updated_at";

/// SQLite diary repository
pub struct SqliteDiaryRepository {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteDiaryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDiaryRepository").finish_non_exhaustive()
    }
}

impl SqliteDiaryRepository {
    /// Open (or create) a database file and ensure the schema exists
    pub fn open(path: impl AsRef<Path>) -> DiaryResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening sqlite diary store");
        Self::with_connection(Connection::open(path)?)
    }

    /// Private in-memory database
    pub fn open_in_memory() -> DiaryResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> DiaryResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock_conn(&self) -> DiaryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DiaryError::Storage("SQLite connection poisoned".to_string()))
    }

    fn query_list(&self, sql: &str, arg: Option<&str>) -> DiaryResult<Vec<DiaryEntry>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = match arg {
            Some(a) => stmt.query_map(params![a], read_row)?,
            None => stmt.query_map([], read_row)?,
        };
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<DiaryEntry> {
    Ok(DiaryEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl DiaryRepository for SqliteDiaryRepository {
    fn save(&self, entry: NewDiaryEntry) -> DiaryResult<DiaryEntry> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO diary (title, content, author, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.title,
                entry.content,
                entry.author,
                entry.created_at,
                entry.updated_at
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(entry.with_id(id))
    }

    fn update(&self, entry: &DiaryEntry) -> DiaryResult<()> {
        let conn = self.lock_conn()?;
        let changed = conn.execute(
            "UPDATE diary SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4",
            params![entry.title, entry.content, entry.updated_at, entry.id],
        )?;
        if changed == 0 {
            return Err(DiaryError::NotFound(entry.id));
        }
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> DiaryResult<Option<DiaryEntry>> {
        let conn = self.lock_conn()?;
        let sql = format!("SELECT {} FROM diary WHERE id = ?1", COLUMNS);
        conn.query_row(&sql, params![id], read_row)
            .optional()
            .map_err(DiaryError::from)
    }

    fn find_all(&self) -> DiaryResult<Vec<DiaryEntry>> {
        let sql = format!("SELECT {} FROM diary ORDER BY id", COLUMNS);
        self.query_list(&sql, None)
    }

    fn find_by_author(&self, author: &str) -> DiaryResult<Vec<DiaryEntry>> {
        // `=` uses BINARY collation: exact and case-sensitive.
        let sql = format!("SELECT {} FROM diary WHERE author = ?1 ORDER BY id", COLUMNS);
        self.query_list(&sql, Some(author))
    }

    fn find_by_title_containing(&self, keyword: &str) -> DiaryResult<Vec<DiaryEntry>> {
        // instr() avoids LIKE wildcards and LIKE's ASCII case folding.
        let sql = format!(
            "SELECT {} FROM diary WHERE instr(title, ?1) > 0 ORDER BY id",
            COLUMNS
        );
        self.query_list(&sql, Some(keyword))
    }

    fn exists_by_id(&self, id: i64) -> DiaryResult<bool> {
        let conn = self.lock_conn()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM diary WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn delete_by_id(&self, id: i64) -> DiaryResult<()> {
        let conn = self.lock_conn()?;
        conn.execute("DELETE FROM diary WHERE id = ?1", params![id])?;
        Ok(())
    }
}
