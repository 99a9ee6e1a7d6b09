//! OpenAI-compatible [`LlmClient`]: wraps openai-client; system instructions travel as
//! ordinary system messages.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::CompletionFormat;
use prompt::ChatMessage;
use tracing::instrument;

use super::{chat_message_to_openai, LlmClient, LlmConfig, ResponseFormat};
use crate::config::DEFAULT_MODEL;

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Rejects blank replies; blocked or filtered generations come back empty.
fn non_empty_reply(text: String) -> Result<String> {
    if text.trim().is_empty() {
        anyhow::bail!("Empty response from model");
    }
    Ok(text)
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn generate(
        &self,
        messages: Vec<ChatMessage>,
        format: ResponseFormat,
    ) -> Result<String> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        let completion_format = match format {
            ResponseFormat::Text => CompletionFormat::Text,
            ResponseFormat::Json => CompletionFormat::JsonObject,
        };
        let text = self
            .client
            .chat_completion(&self.model, openai_messages, completion_format)
            .await?;
        non_empty_reply(text)
    }
}
