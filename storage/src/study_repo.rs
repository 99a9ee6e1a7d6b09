//! Study repository: the learning database on SQLite.
//!
//! Reads the windowed record streams and comprehension rows, and stores generated reports and
//! quizzes under per-user, per-day task folders. Insert helpers exist for seeding and tests.

use async_trait::async_trait;
use chrono::Utc;
use study_core::{
    ComprehensionUpdateSuggestion, FieldRecord, Message, Post, PostReply, Quiz, SubjectRecord,
    TaskDay, TimeWindow, WindowRecords,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StorageError;
use crate::repository::{RecordSource, TaskStore};
use crate::rows::{FieldRow, MessageRow, PostReplyRow, PostRow, QuizRow, SubjectRow};
use crate::sqlite_pool::SqlitePoolManager;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS rooms (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id TEXT PRIMARY KEY,
        room_id TEXT NOT NULL,
        role TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS posts (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        comment TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS post_messages_to_ai (
        id TEXT PRIMARY KEY,
        post_id TEXT NOT NULL,
        role TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_comprehension (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        subject TEXT NOT NULL,
        comprehension REAL NOT NULL,
        explanation TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_comprehension_sub (
        id TEXT PRIMARY KEY,
        comprehension_id TEXT NOT NULL,
        field TEXT NOT NULL,
        comprehension REAL NOT NULL,
        explanation TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS task_folders (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        task_date TEXT NOT NULL,
        created_at TEXT NOT NULL,
        UNIQUE (user_id, task_date)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS daily_reports (
        id TEXT PRIMARY KEY,
        task_folder_id TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS quizzes (
        id TEXT PRIMARY KEY,
        task_folder_id TEXT NOT NULL,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_messages_room_id ON messages(room_id)",
    "CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_post_ai_created_at ON post_messages_to_ai(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_post_ai_post_id ON post_messages_to_ai(post_id)",
    "CREATE INDEX IF NOT EXISTS idx_comprehension_sub_parent ON user_comprehension_sub(comprehension_id)",
];

#[derive(Clone)]
pub struct StudyRepository {
    pool_manager: SqlitePoolManager,
}

impl StudyRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }

        info!("Database tables created successfully");
        Ok(())
    }

    pub async fn insert_room(&self, room_id: &str, user_id: &str) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO rooms (id, user_id) VALUES (?, ?)")
            .bind(room_id)
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(())
    }

    /// Inserts a room message; returns its generated id.
    pub async fn insert_message(&self, message: &Message) -> Result<String, StorageError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO messages (id, room_id, role, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&message.room_id)
        .bind(&message.role)
        .bind(&message.content)
        .bind(message.created_at)
        .execute(self.pool_manager.pool())
        .await?;
        debug!(id = %id, room_id = %message.room_id, "Saved message");
        Ok(id)
    }

    pub async fn insert_post(&self, post: &Post) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO posts (id, user_id, comment, created_at) VALUES (?, ?, ?, ?)")
            .bind(&post.id)
            .bind(&post.user_id)
            .bind(&post.comment)
            .bind(post.created_at)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(())
    }

    /// Inserts an AI reply to a post; returns its generated id.
    pub async fn insert_post_reply(&self, reply: &PostReply) -> Result<String, StorageError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO post_messages_to_ai (id, post_id, role, content, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&reply.post_id)
        .bind(&reply.role)
        .bind(&reply.content)
        .bind(reply.created_at)
        .execute(self.pool_manager.pool())
        .await?;
        Ok(id)
    }

    pub async fn insert_subject(&self, subject: &SubjectRecord) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO user_comprehension (id, user_id, subject, comprehension, explanation)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&subject.id)
        .bind(&subject.user_id)
        .bind(&subject.subject)
        .bind(subject.comprehension)
        .bind(&subject.explanation)
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    /// Inserts a field row under its subject; returns its generated id.
    pub async fn insert_field(&self, field: &FieldRecord) -> Result<String, StorageError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO user_comprehension_sub (id, comprehension_id, field, comprehension, explanation)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&field.comprehension_id)
        .bind(&field.field)
        .bind(field.comprehension)
        .bind(&field.explanation)
        .execute(self.pool_manager.pool())
        .await?;
        Ok(id)
    }

    async fn task_folder_id(&self, day: &TaskDay) -> Result<Option<String>, StorageError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT id FROM task_folders WHERE user_id = ? AND task_date = ?")
                .bind(&day.user_id)
                .bind(task_date(day))
                .fetch_optional(self.pool_manager.pool())
                .await?;
        Ok(row.map(|r| r.0))
    }

    /// Reports stored for the day, oldest first.
    pub async fn daily_reports(&self, day: &TaskDay) -> Result<Vec<String>, StorageError> {
        let Some(folder_id) = self.task_folder_id(day).await? else {
            return Ok(Vec::new());
        };
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT content FROM daily_reports WHERE task_folder_id = ? ORDER BY created_at, rowid",
        )
        .bind(&folder_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Quizzes stored for the day, in insertion order.
    pub async fn quizzes(&self, day: &TaskDay) -> Result<Vec<Quiz>, StorageError> {
        let Some(folder_id) = self.task_folder_id(day).await? else {
            return Ok(Vec::new());
        };
        let rows: Vec<QuizRow> = sqlx::query_as(
            "SELECT question, answer FROM quizzes WHERE task_folder_id = ? ORDER BY rowid",
        )
        .bind(&folder_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(rows.into_iter().map(Quiz::from).collect())
    }
}

fn task_date(day: &TaskDay) -> String {
    day.date.format("%Y-%m-%d").to_string()
}

#[async_trait]
impl RecordSource for StudyRepository {
    async fn fetch_window(
        &self,
        window: &TimeWindow,
        user_id: Option<&str>,
    ) -> Result<WindowRecords, StorageError> {
        let pool = self.pool_manager.pool();
        let start = window.start_utc();
        let end = window.end_utc();

        let messages: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT m.room_id, m.role, m.content, m.created_at
            FROM messages m
            LEFT JOIN rooms r ON r.id = m.room_id
            WHERE m.created_at >= ? AND m.created_at <= ?
              AND (? IS NULL OR r.user_id = ?)
            ORDER BY m.created_at ASC, m.rowid ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let posts: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, comment, created_at
            FROM posts
            WHERE created_at >= ? AND created_at <= ?
              AND (? IS NULL OR user_id = ?)
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let replies: Vec<PostReplyRow> = sqlx::query_as(
            r#"
            SELECT a.post_id, a.role, a.content, a.created_at
            FROM post_messages_to_ai a
            LEFT JOIN posts p ON p.id = a.post_id
            WHERE a.created_at >= ? AND a.created_at <= ?
              AND (? IS NULL OR p.user_id = ?)
            ORDER BY a.created_at ASC, a.rowid ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        info!(
            window = %window,
            user_id = user_id.unwrap_or("*"),
            messages = messages.len(),
            posts = posts.len(),
            replies = replies.len(),
            "Fetched window records"
        );

        Ok(WindowRecords {
            messages: messages.into_iter().map(Message::from).collect(),
            posts: posts.into_iter().map(Post::from).collect(),
            replies: replies.into_iter().map(PostReply::from).collect(),
        })
    }

    async fn fetch_comprehension(
        &self,
        user_id: Option<&str>,
    ) -> Result<(Vec<SubjectRecord>, Vec<FieldRecord>), StorageError> {
        let pool = self.pool_manager.pool();

        let subjects: Vec<SubjectRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, subject, comprehension, explanation
            FROM user_comprehension
            WHERE (? IS NULL OR user_id = ?)
            ORDER BY rowid
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let fields: Vec<FieldRow> = sqlx::query_as(
            r#"
            SELECT s.comprehension_id, s.field, s.comprehension, s.explanation
            FROM user_comprehension_sub s
            JOIN user_comprehension c ON c.id = s.comprehension_id
            WHERE (? IS NULL OR c.user_id = ?)
            ORDER BY s.rowid
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok((
            subjects.into_iter().map(SubjectRecord::from).collect(),
            fields.into_iter().map(FieldRecord::from).collect(),
        ))
    }

    async fn active_users(&self, window: &TimeWindow) -> Result<Vec<String>, StorageError> {
        let start = window.start_utc();
        let end = window.end_utc();

        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT r.user_id AS user_id
            FROM messages m
            JOIN rooms r ON r.id = m.room_id
            WHERE m.created_at >= ? AND m.created_at <= ?
            UNION
            SELECT p.user_id AS user_id
            FROM posts p
            WHERE p.user_id IS NOT NULL AND p.created_at >= ? AND p.created_at <= ?
            ORDER BY user_id
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(start)
        .bind(end)
        .fetch_all(self.pool_manager.pool())
        .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}

#[async_trait]
impl TaskStore for StudyRepository {
    async fn save_daily_results(
        &self,
        day: &TaskDay,
        report: &str,
        quizzes: &[Quiz],
    ) -> Result<String, StorageError> {
        let pool = self.pool_manager.pool();
        let now = Utc::now();

        sqlx::query(
            "INSERT OR IGNORE INTO task_folders (id, user_id, task_date, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&day.user_id)
        .bind(task_date(day))
        .bind(now)
        .execute(pool)
        .await?;

        let folder_id = self
            .task_folder_id(day)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("task folder for {}", day.user_id)))?;

        sqlx::query(
            "INSERT INTO daily_reports (id, task_folder_id, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&folder_id)
        .bind(report)
        .bind(now)
        .execute(pool)
        .await?;

        for quiz in quizzes {
            sqlx::query(
                r#"
                INSERT INTO quizzes (id, task_folder_id, question, answer, created_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&folder_id)
            .bind(&quiz.question)
            .bind(&quiz.answer)
            .bind(now)
            .execute(pool)
            .await?;
        }

        info!(
            user_id = %day.user_id,
            task_date = %day.date,
            folder_id = %folder_id,
            quizzes = quizzes.len(),
            "Saved daily results"
        );
        Ok(folder_id)
    }

    async fn apply_explanation_updates(
        &self,
        user_id: &str,
        suggestion: &ComprehensionUpdateSuggestion,
    ) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();
        let mut updated = 0;

        for (name, explanation) in &suggestion.update_explanation {
            let fields = sqlx::query(
                r#"
                UPDATE user_comprehension_sub SET explanation = ?
                WHERE field = ?
                  AND comprehension_id IN (SELECT id FROM user_comprehension WHERE user_id = ?)
                "#,
            )
            .bind(explanation)
            .bind(name)
            .bind(user_id)
            .execute(pool)
            .await?;

            let subjects = sqlx::query(
                "UPDATE user_comprehension SET explanation = ? WHERE subject = ? AND user_id = ?",
            )
            .bind(explanation)
            .bind(name)
            .bind(user_id)
            .execute(pool)
            .await?;

            updated += fields.rows_affected() + subjects.rows_affected();
        }

        info!(user_id = %user_id, updated, "Applied explanation updates");
        Ok(updated)
    }
}
