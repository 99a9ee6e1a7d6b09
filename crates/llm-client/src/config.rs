//! LLM configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> &str {
        &self.base_url
    }
    fn model(&self) -> &str {
        &self.model
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl EnvLlmConfig {
    /// Load from environment variables.
    ///
    /// Key: `LLM_API_KEY`, then `GEMINI_API_KEY`, then `OPENAI_API_KEY`.
    /// Endpoint: `LLM_BASE_URL` or `OPENAI_BASE_URL`. Model: `MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = non_empty_var("LLM_API_KEY")
            .or_else(|| non_empty_var("GEMINI_API_KEY"))
            .or_else(|| non_empty_var("OPENAI_API_KEY"))
            .ok_or_else(|| {
                anyhow::anyhow!("LLM_API_KEY (or GEMINI_API_KEY / OPENAI_API_KEY) not set")
            })?;
        let base_url = non_empty_var("LLM_BASE_URL")
            .or_else(|| non_empty_var("OPENAI_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = non_empty_var("MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}
