//! Row types as selected from SQLite; converted into `study_core` records at the boundary.

use chrono::{DateTime, Utc};
use study_core::{FieldRecord, Message, Post, PostReply, Quiz, SubjectRecord};

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MessageRow {
    pub room_id: String,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            room_id: row.room_id,
            role: row.role,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PostRow {
    pub id: String,
    pub user_id: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PostReplyRow {
    pub post_id: String,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<PostReplyRow> for PostReply {
    fn from(row: PostReplyRow) -> Self {
        Self {
            post_id: row.post_id,
            role: row.role,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SubjectRow {
    pub id: String,
    pub user_id: Option<String>,
    pub subject: String,
    pub comprehension: f64,
    pub explanation: Option<String>,
}

impl From<SubjectRow> for SubjectRecord {
    fn from(row: SubjectRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            subject: row.subject,
            comprehension: row.comprehension,
            explanation: row.explanation,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct FieldRow {
    pub comprehension_id: String,
    pub field: String,
    pub comprehension: f64,
    pub explanation: Option<String>,
}

impl From<FieldRow> for FieldRecord {
    fn from(row: FieldRow) -> Self {
        Self {
            comprehension_id: row.comprehension_id,
            field: row.field,
            comprehension: row.comprehension,
            explanation: row.explanation,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct QuizRow {
    pub question: String,
    pub answer: String,
}

impl From<QuizRow> for Quiz {
    fn from(row: QuizRow) -> Self {
        Self {
            question: row.question,
            answer: row.answer,
        }
    }
}
