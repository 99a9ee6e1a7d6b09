//! Seams between the learning tasks and the database.
//!
//! Callers hold these as `Arc<dyn RecordSource>` / `Arc<dyn TaskStore>`, so a run never reaches
//! for a process-wide client.

use async_trait::async_trait;
use study_core::{
    ComprehensionUpdateSuggestion, FieldRecord, Quiz, SubjectRecord, TaskDay, TimeWindow,
    WindowRecords,
};

use crate::error::StorageError;

/// Supplies the records a run works on.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Messages, posts and post replies created within `window` (inclusive), each ascending by
    /// `created_at`. With `user_id`, only records owned by that user.
    async fn fetch_window(
        &self,
        window: &TimeWindow,
        user_id: Option<&str>,
    ) -> Result<WindowRecords, StorageError>;

    /// Current subject and field comprehension rows, optionally for one user.
    async fn fetch_comprehension(
        &self,
        user_id: Option<&str>,
    ) -> Result<(Vec<SubjectRecord>, Vec<FieldRecord>), StorageError>;

    /// Users that own a message room or a post with activity in `window`, sorted.
    async fn active_users(&self, window: &TimeWindow) -> Result<Vec<String>, StorageError>;
}

/// Persists generated results.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores the report and quizzes under the user's task folder for the day, creating the
    /// folder on first use. Returns the folder id.
    async fn save_daily_results(
        &self,
        day: &TaskDay,
        report: &str,
        quizzes: &[Quiz],
    ) -> Result<String, StorageError>;

    /// Writes suggested explanation texts onto the user's matching subjects and fields.
    /// Returns the number of rows updated.
    async fn apply_explanation_updates(
        &self,
        user_id: &str,
        suggestion: &ComprehensionUpdateSuggestion,
    ) -> Result<u64, StorageError>;
}
