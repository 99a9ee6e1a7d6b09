//! Pipelines run by the scheduled entry points.
//!
//! Each run builds a fresh window ending "now", fetches, reconstructs, and hands the
//! document to the services. Runs are sequential; the per-user run keeps going when one
//! user fails and records the failure in that user's result.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use llm_client::LlmClient;
use serde::Serialize;
use storage::{RecordSource, TaskStore};
use study_core::{
    assemble_comprehension, jst, reconstruct, ComprehensionUpdateSuggestion,
    ConversationDocument, Quiz, TaskDay, TimeWindow,
};
use tracing::{error, info, warn};

use crate::comprehension::update_comprehension;
use crate::error::TaskError;
use crate::generated::Generated;
use crate::insight::generate_learning_insights;
use crate::knowledge::generate_advanced_knowledge;
use crate::quiz::make_daily_quizzes;
use crate::report::make_daily_report;

/// Length and timezone anchor of the fetch window.
#[derive(Debug, Clone, Copy)]
pub struct WindowSettings {
    pub hours: i64,
    pub offset: FixedOffset,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            hours: 24,
            offset: jst(),
        }
    }
}

/// Everything produced by one aggregated daily run.
#[derive(Debug, Clone)]
pub struct DailyDigest {
    pub window: TimeWindow,
    pub document: ConversationDocument,
    pub suggestion: Generated<ComprehensionUpdateSuggestion>,
    pub report: Generated<String>,
    pub quizzes: Generated<Vec<Quiz>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRunStatus {
    Success,
    NoData,
    Error,
}

/// Outcome for one user of the per-user run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRunResult {
    pub user_id: String,
    pub status: UserRunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

/// The daily task runner; all collaborators are injected.
#[derive(Clone)]
pub struct DailyTasks {
    source: Arc<dyn RecordSource>,
    store: Arc<dyn TaskStore>,
    llm: Arc<dyn LlmClient>,
    settings: WindowSettings,
}

impl DailyTasks {
    pub fn new(
        source: Arc<dyn RecordSource>,
        store: Arc<dyn TaskStore>,
        llm: Arc<dyn LlmClient>,
        settings: WindowSettings,
    ) -> Self {
        Self {
            source,
            store,
            llm,
            settings,
        }
    }

    pub fn window_at(&self, now: DateTime<Utc>) -> TimeWindow {
        TimeWindow::trailing(now, self.settings.hours, self.settings.offset)
    }

    async fn document_for(
        &self,
        window: &TimeWindow,
        user_id: Option<&str>,
    ) -> Result<ConversationDocument, TaskError> {
        let records = self.source.fetch_window(window, user_id).await?;
        let document = reconstruct(&records.messages, &records.posts, &records.replies);
        info!(
            user_id = user_id.unwrap_or("*"),
            rooms = document.messages_by_room.len(),
            posts = document.posts_conversations.len(),
            "Reconstructed conversation document"
        );
        info!("Conversation document:\n{}", document.to_json_pretty()?);
        Ok(document)
    }

    /// Snapshot fetch failures degrade to an empty suggestion rather than aborting the run.
    async fn suggestion_for(
        &self,
        user_id: Option<&str>,
        document: &ConversationDocument,
    ) -> Generated<ComprehensionUpdateSuggestion> {
        match self.source.fetch_comprehension(user_id).await {
            Ok((subjects, fields)) => {
                let snapshot = assemble_comprehension(&subjects, &fields);
                update_comprehension(self.llm.as_ref(), &snapshot, document).await
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch comprehension data");
                Generated::fallback(ComprehensionUpdateSuggestion::default(), e.to_string())
            }
        }
    }

    /// Aggregated run over every user's records in the window; results are logged only.
    ///
    /// Returns `None` when the window holds no conversations. Fetch errors propagate.
    pub async fn run_all(&self, now: DateTime<Utc>) -> Result<Option<DailyDigest>, TaskError> {
        let window = self.window_at(now);
        info!(window = %window, "Running daily tasks for all users");

        let document = self.document_for(&window, None).await?;
        if document.is_empty() {
            info!("No conversations in window");
            return Ok(None);
        }

        let suggestion = self.suggestion_for(None, &document).await;
        let report = make_daily_report(self.llm.as_ref(), &document).await;
        let quizzes = make_daily_quizzes(self.llm.as_ref(), &document, report.value()).await;

        info!(
            "Comprehension update suggestion:\n{}",
            serde_json::to_string_pretty(suggestion.value())?
        );
        info!("Daily report:\n{}", report.value());
        info!("Quizzes:\n{}", serde_json::to_string_pretty(quizzes.value())?);

        Ok(Some(DailyDigest {
            window,
            document,
            suggestion,
            report,
            quizzes,
        }))
    }

    /// Per-user run: generates and persists results for every user active in the window.
    ///
    /// Listing the users is the only step whose failure aborts the run.
    pub async fn run_per_user(&self, now: DateTime<Utc>) -> Result<Vec<UserRunResult>, TaskError> {
        let window = self.window_at(now);
        let users = self.source.active_users(&window).await?;
        info!(window = %window, users = users.len(), "Running daily tasks per user");

        let mut results = Vec::with_capacity(users.len());
        for user_id in users {
            let outcome = self.run_user(&window, &user_id).await;
            let result = match outcome {
                Ok(Some(folder_id)) => UserRunResult {
                    user_id,
                    status: UserRunStatus::Success,
                    task_folder_id: Some(folder_id),
                    error_details: None,
                },
                Ok(None) => UserRunResult {
                    user_id,
                    status: UserRunStatus::NoData,
                    task_folder_id: None,
                    error_details: None,
                },
                Err(e) => {
                    error!(user_id = %user_id, error = %e, "Daily tasks failed for user");
                    UserRunResult {
                        user_id,
                        status: UserRunStatus::Error,
                        task_folder_id: None,
                        error_details: Some(e.to_string()),
                    }
                }
            };
            results.push(result);
        }
        Ok(results)
    }

    /// Returns the task folder id, or `None` when the user had no conversations.
    async fn run_user(
        &self,
        window: &TimeWindow,
        user_id: &str,
    ) -> Result<Option<String>, TaskError> {
        let document = self.document_for(window, Some(user_id)).await?;
        if document.is_empty() {
            info!(user_id = %user_id, "No conversations for user");
            return Ok(None);
        }

        let suggestion = self.suggestion_for(Some(user_id), &document).await;
        let report = make_daily_report(self.llm.as_ref(), &document).await;
        let quizzes = make_daily_quizzes(self.llm.as_ref(), &document, report.value()).await;

        let day = TaskDay::for_window(user_id, window);
        let folder_id = self
            .store
            .save_daily_results(&day, report.value(), quizzes.value())
            .await?;

        if let Generated::Produced(suggestion) = &suggestion {
            if !suggestion.update_explanation.is_empty() {
                self.store
                    .apply_explanation_updates(user_id, suggestion)
                    .await?;
            }
            if !suggestion.level_up_field.is_empty() {
                info!(
                    user_id = %user_id,
                    fields = ?suggestion.level_up_field,
                    "Fields leveled up"
                );
            }
        } else {
            warn!(user_id = %user_id, "Comprehension suggestion unavailable; nothing applied");
        }

        Ok(Some(folder_id))
    }

    /// Learning insights over every user's records; `None` when there is no data.
    pub async fn run_insights(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<Generated<String>>, TaskError> {
        let window = self.window_at(now);
        let document = self.document_for(&window, None).await?;
        if document.is_empty() {
            return Ok(None);
        }
        let insights = generate_learning_insights(self.llm.as_ref(), &document).await;
        info!("Learning insights:\n{}", insights.value());
        Ok(Some(insights))
    }

    /// Advanced knowledge over every user's records; `None` when there is no data.
    pub async fn run_advanced_knowledge(
        &self,
        now: DateTime<Utc>,
        theme: Option<&str>,
    ) -> Result<Option<Generated<String>>, TaskError> {
        let window = self.window_at(now);
        let document = self.document_for(&window, None).await?;
        if document.is_empty() {
            return Ok(None);
        }
        let knowledge = generate_advanced_knowledge(self.llm.as_ref(), &document, theme).await;
        info!("Advanced knowledge:\n{}", knowledge.value());
        Ok(Some(knowledge))
    }
}
