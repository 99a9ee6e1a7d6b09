//! Storage crate: the learning database behind the record-source and task-store seams.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`rows`] – sqlx row types mapped onto `study_core` records
//! - [`repository`] – RecordSource / TaskStore traits
//! - [`study_repo`] – StudyRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod repository;
mod rows;
mod sqlite_pool;
mod study_repo;

pub use error::StorageError;
pub use repository::{RecordSource, TaskStore};
pub use sqlite_pool::SqlitePoolManager;
pub use study_repo::StudyRepository;
