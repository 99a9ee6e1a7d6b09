//! Daily learning report.

use llm_client::{LlmClient, ResponseFormat};
use study_core::ConversationDocument;
use tracing::{error, info};

use crate::generated::Generated;

/// Placeholder stored and logged when the report cannot be generated.
pub const REPORT_FALLBACK: &str = "レポート生成中にエラーが発生しました。";

/// Writes the day's summary and advice as free text.
pub async fn make_daily_report(
    llm: &dyn LlmClient,
    document: &ConversationDocument,
) -> Generated<String> {
    let document_json = match document.to_json_pretty() {
        Ok(json) => json,
        Err(e) => return Generated::fallback(REPORT_FALLBACK.to_string(), e.to_string()),
    };

    match llm
        .generate(prompt::daily_report_messages(&document_json), ResponseFormat::Text)
        .await
    {
        Ok(text) => {
            info!(chars = text.chars().count(), "Generated daily report");
            Generated::Produced(text)
        }
        Err(e) => {
            error!(error = %e, "Daily report generation failed");
            Generated::fallback(REPORT_FALLBACK.to_string(), e.to_string())
        }
    }
}
