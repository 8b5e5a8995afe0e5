//! # Diary Module
//!
//! Diary entries, their stores, and the service that manages them.

pub mod clock;
pub mod dto;
pub mod entry;
pub mod errors;
pub mod repository;
pub mod service;
pub mod sqlite;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dto::{CreateDiary, CreateDiaryRequest, DiaryResponse, UpdateDiaryRequest};
pub use entry::{DiaryEntry, NewDiaryEntry};
pub use errors::{DiaryError, DiaryResult, FieldError};
pub use repository::{DiaryRepository, InMemoryDiaryRepository};
pub use service::DiaryService;
pub use sqlite::SqliteDiaryRepository;
