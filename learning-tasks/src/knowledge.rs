//! Advanced knowledge: deeper material building on the day's topics.

use llm_client::{LlmClient, ResponseFormat};
use study_core::ConversationDocument;
use tracing::{error, info};

use crate::generated::Generated;

pub const KNOWLEDGE_FALLBACK: &str = "発展的知識の生成中にエラーが発生しました。";

/// `theme`, when given and non-blank, narrows the material to that topic.
pub async fn generate_advanced_knowledge(
    llm: &dyn LlmClient,
    document: &ConversationDocument,
    theme: Option<&str>,
) -> Generated<String> {
    let document_json = match document.to_json_pretty() {
        Ok(json) => json,
        Err(e) => return Generated::fallback(KNOWLEDGE_FALLBACK.to_string(), e.to_string()),
    };

    let messages = prompt::advanced_knowledge_messages(&document_json, theme);
    match llm.generate(messages, ResponseFormat::Text).await {
        Ok(text) => {
            info!(theme = ?theme, chars = text.chars().count(), "Generated advanced knowledge");
            Generated::Produced(text)
        }
        Err(e) => {
            error!(error = %e, "Advanced knowledge generation failed");
            Generated::fallback(KNOWLEDGE_FALLBACK.to_string(), e.to_string())
        }
    }
}
