//! Record types read from and written to the learning database.
//!
//! Field presence is explicit: anything the source may omit is an `Option` and serializes
//! as `null`, so consumers can tell "no data" apart from an empty string.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A direct chat message. Belongs to exactly one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub room_id: String,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A user-initiated post; root of a post conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// An AI message attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostReply {
    pub post_id: String,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// The three record sets fetched for one time window, each ascending by `created_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowRecords {
    pub messages: Vec<Message>,
    pub posts: Vec<Post>,
    pub replies: Vec<PostReply>,
}

impl WindowRecords {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.posts.is_empty() && self.replies.is_empty()
    }
}

/// Subject-level mastery row (`user_comprehension`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: String,
    pub user_id: Option<String>,
    pub subject: String,
    pub comprehension: f64,
    pub explanation: Option<String>,
}

/// Field-level mastery row (`user_comprehension_sub`), child of a [`SubjectRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub comprehension_id: String,
    pub field: String,
    pub comprehension: f64,
    pub explanation: Option<String>,
}

/// A generated follow-up question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub question: String,
    pub answer: String,
}

/// Model suggestion of which fields leveled up and which explanations to rewrite.
///
/// Wire names follow the model's response schema (`levelUpField`, `updateExplanation`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprehensionUpdateSuggestion {
    #[serde(rename = "levelUpField", default)]
    pub level_up_field: Vec<String>,
    #[serde(rename = "updateExplanation", default)]
    pub update_explanation: IndexMap<String, String>,
}

impl ComprehensionUpdateSuggestion {
    /// True when the model proposed no change at all.
    pub fn is_empty(&self) -> bool {
        self.level_up_field.is_empty() && self.update_explanation.is_empty()
    }
}
