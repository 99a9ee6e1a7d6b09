//! # Prompt
//!
//! Chat message types and the prompts sent to the model by each learning task.
//!
//! ## Layout
//!
//! Every builder in [`learning`] returns a system instruction followed by one user message.
//! Structured inputs (conversation document, comprehension snapshot) are embedded as fenced
//! JSON blocks; callers serialize them beforehand.
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to OpenAI-compatible chat APIs through `llm-client`.

pub mod learning;

pub use learning::{
    advanced_knowledge_messages, comprehension_update_messages, daily_quiz_messages,
    daily_report_messages, learning_insight_messages,
};

/// Chat role; serialized by `llm-client` as the API's `role` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One entry of the `messages` array sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Task instruction placed first in every learning prompt.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}
