//! Supplementary learning insights: related fields, next topics, exercises, everyday links.

use llm_client::{LlmClient, ResponseFormat};
use study_core::ConversationDocument;
use tracing::{error, info};

use crate::generated::Generated;

pub const INSIGHT_FALLBACK: &str = "学習内容の分析中にエラーが発生しました。";

pub async fn generate_learning_insights(
    llm: &dyn LlmClient,
    document: &ConversationDocument,
) -> Generated<String> {
    let document_json = match document.to_json_pretty() {
        Ok(json) => json,
        Err(e) => return Generated::fallback(INSIGHT_FALLBACK.to_string(), e.to_string()),
    };

    match llm
        .generate(prompt::learning_insight_messages(&document_json), ResponseFormat::Text)
        .await
    {
        Ok(text) => {
            info!(chars = text.chars().count(), "Generated learning insights");
            Generated::Produced(text)
        }
        Err(e) => {
            error!(error = %e, "Learning insight generation failed");
            Generated::fallback(INSIGHT_FALLBACK.to_string(), e.to_string())
        }
    }
}
