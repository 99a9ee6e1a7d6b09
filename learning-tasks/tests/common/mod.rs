//! Shared test doubles: a scripted LLM, a failing LLM, a source that fails for one user,
//! and seeding helpers over an in-memory [`StudyRepository`].

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use llm_client::{LlmClient, ResponseFormat};
use prompt::learning::{
    ADVANCED_KNOWLEDGE_SYSTEM, COMPREHENSION_SYSTEM, INSIGHT_SYSTEM, QUIZ_SYSTEM, REPORT_SYSTEM,
};
use prompt::ChatMessage;
use storage::{RecordSource, StorageError, StudyRepository};
use study_core::{
    FieldRecord, Message, Post, PostReply, SubjectRecord, TimeWindow, WindowRecords,
};

/// One recorded call: system instruction, user prompt, requested format.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
    pub format: ResponseFormat,
}

/// Replies by task, recognised from the system instruction. No network.
pub struct ScriptedLlm {
    pub suggestion: String,
    pub report: String,
    pub quizzes: String,
    pub insight: String,
    pub knowledge: String,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl Default for ScriptedLlm {
    fn default() -> Self {
        Self {
            suggestion: r#"{"levelUpField":["微分"],"updateExplanation":{"微分":"導関数を説明できる"}}"#
                .to_string(),
            report: "今日は微分を頑張りました。".to_string(),
            quizzes: r#"{"questions":[{"question":"x^2 の導関数は？","answer":"2x"}]}"#.to_string(),
            insight: "【関連分野と応用例】物理の速度".to_string(),
            knowledge: "テイラー展開へ進みましょう。".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedLlm {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, system: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.system == system)
            .collect()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn generate(
        &self,
        messages: Vec<ChatMessage>,
        format: ResponseFormat,
    ) -> anyhow::Result<String> {
        let system = messages.first().map(|m| m.content.clone()).unwrap_or_default();
        let user = messages.get(1).map(|m| m.content.clone()).unwrap_or_default();
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.clone(),
            user,
            format,
        });

        let reply = match system.as_str() {
            s if s == COMPREHENSION_SYSTEM => &self.suggestion,
            s if s == REPORT_SYSTEM => &self.report,
            s if s == QUIZ_SYSTEM => &self.quizzes,
            s if s == INSIGHT_SYSTEM => &self.insight,
            s if s == ADVANCED_KNOWLEDGE_SYSTEM => &self.knowledge,
            other => anyhow::bail!("unexpected system prompt: {}", other),
        };
        Ok(reply.clone())
    }
}

/// Every call fails, as an exhausted quota or a blocked response would.
pub struct FailingLlm;

#[async_trait]
impl LlmClient for FailingLlm {
    async fn generate(
        &self,
        _messages: Vec<ChatMessage>,
        _format: ResponseFormat,
    ) -> anyhow::Result<String> {
        anyhow::bail!("quota exceeded")
    }
}

/// Delegates to a repository but fails window fetches for `failing_user`
/// (or for every fetch when `failing_user` is `None`).
pub struct FlakySource {
    pub inner: StudyRepository,
    pub failing_user: Option<String>,
}

#[async_trait]
impl RecordSource for FlakySource {
    async fn fetch_window(
        &self,
        window: &TimeWindow,
        user_id: Option<&str>,
    ) -> Result<WindowRecords, StorageError> {
        match (&self.failing_user, user_id) {
            (None, _) => Err(StorageError::Database("connection reset".to_string())),
            (Some(bad), Some(user)) if bad == user => {
                Err(StorageError::Database("connection reset".to_string()))
            }
            _ => self.inner.fetch_window(window, user_id).await,
        }
    }

    async fn fetch_comprehension(
        &self,
        user_id: Option<&str>,
    ) -> Result<(Vec<SubjectRecord>, Vec<FieldRecord>), StorageError> {
        self.inner.fetch_comprehension(user_id).await
    }

    async fn active_users(&self, window: &TimeWindow) -> Result<Vec<String>, StorageError> {
        self.inner.active_users(window).await
    }
}

pub fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-05-02T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn hours_ago(h: i64) -> DateTime<Utc> {
    now() - Duration::hours(h)
}

pub async fn empty_repo() -> StudyRepository {
    StudyRepository::new("sqlite::memory:")
        .await
        .expect("in-memory repo")
}

/// alice: room r1 with two messages, post p1 with one reply, subject 数学/微分.
/// bob: room r2 with one message.
pub async fn seeded_repo() -> StudyRepository {
    let repo = empty_repo().await;
    repo.insert_room("r1", "alice").await.unwrap();
    repo.insert_room("r2", "bob").await.unwrap();

    for (room, role, content, at) in [
        ("r1", "user", "微分って何？", 5),
        ("r1", "assistant", "変化率のことです", 4),
        ("r2", "user", "英語の時制", 3),
    ] {
        repo.insert_message(&Message {
            room_id: room.to_string(),
            role: role.to_string(),
            content: content.to_string(),
            created_at: hours_ago(at),
        })
        .await
        .unwrap();
    }

    repo.insert_post(&Post {
        id: "p1".to_string(),
        user_id: Some("alice".to_string()),
        comment: "積分との関係は？".to_string(),
        created_at: hours_ago(2),
    })
    .await
    .unwrap();
    repo.insert_post_reply(&PostReply {
        post_id: "p1".to_string(),
        role: "assistant".to_string(),
        content: "逆の操作です".to_string(),
        created_at: hours_ago(1),
    })
    .await
    .unwrap();

    repo.insert_subject(&SubjectRecord {
        id: "c1".to_string(),
        user_id: Some("alice".to_string()),
        subject: "数学".to_string(),
        comprehension: 40.0,
        explanation: None,
    })
    .await
    .unwrap();
    repo.insert_field(&FieldRecord {
        comprehension_id: "c1".to_string(),
        field: "微分".to_string(),
        comprehension: 20.0,
        explanation: None,
    })
    .await
    .unwrap();

    repo
}
