//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and an OpenAI-compatible implementation. Callers receive the
//! client as an injected `Arc<dyn LlmClient>`; nothing here is a process-wide singleton.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use openai_llm::OpenAILlmClient;

/// Shape of the reply the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Free text (reports, insights).
    Text,
    /// A single JSON object (quizzes, comprehension suggestions).
    Json,
}

/// LLM client interface: generate content from a list of messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text. An empty or blank reply (blocked, filtered) is an error.
    async fn generate(&self, messages: Vec<ChatMessage>, format: ResponseFormat)
        -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
