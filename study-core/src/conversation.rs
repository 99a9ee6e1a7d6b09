//! Conversation reconstruction: joins the three windowed record streams into one document.
//!
//! ## Shape
//!
//! - `messages_by_room`: room id → entries in the order received (rooms keyed by first encounter)
//! - `posts_conversations`: one thread per post in fetch order; the user's comment first,
//!   then the post's replies sorted ascending by `created_at`
//!
//! Room buckets are NOT re-sorted: the fetch query orders messages by `created_at`, and
//! unsorted input yields unsorted buckets. Reply threads are always sorted (stable).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::records::{Message, Post, PostReply};

/// Role given to the synthetic entry that carries a post's own comment.
pub const USER_ROLE: &str = "user";

/// One message inside a room bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomEntry {
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for RoomEntry {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role.clone(),
            content: msg.content.clone(),
            created_at: msg.created_at,
        }
    }
}

/// One turn of a post thread.
///
/// The initiating turn carries `comment`, replies carry `content`; the JSON shape
/// distinguishes them, so the enum is untagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThreadEntry {
    Comment {
        role: String,
        comment: String,
        created_at: DateTime<Utc>,
    },
    Reply {
        role: String,
        content: String,
        created_at: DateTime<Utc>,
    },
}

impl ThreadEntry {
    pub fn role(&self) -> &str {
        match self {
            Self::Comment { role, .. } | Self::Reply { role, .. } => role,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Comment { created_at, .. } | Self::Reply { created_at, .. } => *created_at,
        }
    }
}

impl From<&Post> for ThreadEntry {
    fn from(post: &Post) -> Self {
        Self::Comment {
            role: USER_ROLE.to_string(),
            comment: post.comment.clone(),
            created_at: post.created_at,
        }
    }
}

impl From<&PostReply> for ThreadEntry {
    fn from(reply: &PostReply) -> Self {
        Self::Reply {
            role: reply.role.clone(),
            content: reply.content.clone(),
            created_at: reply.created_at,
        }
    }
}

/// A post and its reconstructed thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostConversation {
    pub post_id: String,
    pub conversation: Vec<ThreadEntry>,
}

/// The day's conversations, ready to be serialized into a prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationDocument {
    pub messages_by_room: IndexMap<String, Vec<RoomEntry>>,
    pub posts_conversations: Vec<PostConversation>,
}

impl ConversationDocument {
    /// No rooms and no posts: nothing happened in the window.
    pub fn is_empty(&self) -> bool {
        self.messages_by_room.is_empty() && self.posts_conversations.is_empty()
    }

    /// Pretty JSON with non-ASCII text kept as-is, the form embedded in prompts and logs.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds the conversation document from already-windowed records.
///
/// Performs no filtering and never mutates its inputs. Rooms and posts absent from the
/// input never appear; duplicates are kept as given.
pub fn reconstruct(
    messages: &[Message],
    posts: &[Post],
    replies: &[PostReply],
) -> ConversationDocument {
    let mut messages_by_room: IndexMap<String, Vec<RoomEntry>> = IndexMap::new();
    for msg in messages {
        messages_by_room
            .entry(msg.room_id.clone())
            .or_default()
            .push(RoomEntry::from(msg));
    }

    let mut replies_by_post: HashMap<&str, Vec<&PostReply>> = HashMap::new();
    for reply in replies {
        replies_by_post
            .entry(reply.post_id.as_str())
            .or_default()
            .push(reply);
    }

    let posts_conversations = posts
        .iter()
        .map(|post| {
            let mut thread = replies_by_post
                .get(post.id.as_str())
                .cloned()
                .unwrap_or_default();
            thread.sort_by_key(|reply| reply.created_at);

            let mut conversation = Vec::with_capacity(thread.len() + 1);
            conversation.push(ThreadEntry::from(post));
            conversation.extend(thread.into_iter().map(ThreadEntry::from));

            PostConversation {
                post_id: post.id.clone(),
                conversation,
            }
        })
        .collect();

    ConversationDocument {
        messages_by_room,
        posts_conversations,
    }
}
