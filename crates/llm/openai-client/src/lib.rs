//! # OpenAI-compatible API client
//!
//! Thin wrapper around [async-openai] for non-streamed chat completion, plain text or
//! JSON-object output. Works against any OpenAI-compatible endpoint (e.g. Gemini's).
//! Provides token masking for safe logging.

use async_openai::{
    types::{CreateChatCompletionRequestArgs, ResponseFormat},
    Client,
};
use std::sync::Arc;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Output the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionFormat {
    #[default]
    Text,
    /// `response_format: {"type": "json_object"}`; the reply must be a single JSON object.
    JsonObject,
}

/// Chat client. Wraps async-openai client; holds the API key only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    api_key_for_logging: Option<String>,
}

impl OpenAIClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    /// Builds a client with a custom base URL (compatible endpoints, proxies).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    /// Sends a chat completion request and returns the first choice's text.
    ///
    /// Logs masked API key, message count and token usage. Errors if the response has no
    /// choices; a choice without content yields an empty string.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        format: CompletionFormat,
    ) -> anyhow::Result<String> {
        let masked = self
            .api_key_for_logging
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "***".to_string());

        tracing::info!(
            model = %model,
            message_count = messages.len(),
            format = ?format,
            api_key = %masked,
            "chat_completion request"
        );

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(model).messages(messages);
        if format == CompletionFormat::JsonObject {
            args.response_format(ResponseFormat::JsonObject);
        }
        let request = args.build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No choices in chat completion response"),
        }
    }
}
