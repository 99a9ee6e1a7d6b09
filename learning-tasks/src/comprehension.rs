//! Comprehension update suggestion: which fields leveled up, which explanations to rewrite.

use llm_client::{LlmClient, ResponseFormat};
use study_core::{ComprehensionUpdateSuggestion, ConversationDocument, SubjectComprehension};
use tracing::{error, info};

use crate::generated::Generated;
use crate::json_reply::strip_code_fence;

/// Asks the model for a [`ComprehensionUpdateSuggestion`] from the current snapshot and the
/// day's conversation. Any generation or parse failure yields an empty suggestion.
pub async fn update_comprehension(
    llm: &dyn LlmClient,
    snapshot: &[SubjectComprehension],
    document: &ConversationDocument,
) -> Generated<ComprehensionUpdateSuggestion> {
    let (snapshot_json, document_json) =
        match (serde_json::to_string_pretty(snapshot), document.to_json_pretty()) {
            (Ok(s), Ok(d)) => (s, d),
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "Failed to serialize comprehension prompt input");
                return Generated::fallback(ComprehensionUpdateSuggestion::default(), e.to_string());
            }
        };

    let messages = prompt::comprehension_update_messages(&snapshot_json, &document_json);
    let text = match llm.generate(messages, ResponseFormat::Json).await {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "Comprehension update generation failed");
            return Generated::fallback(ComprehensionUpdateSuggestion::default(), e.to_string());
        }
    };

    match serde_json::from_str::<ComprehensionUpdateSuggestion>(strip_code_fence(&text)) {
        Ok(suggestion) => {
            info!(
                level_up = suggestion.level_up_field.len(),
                explanations = suggestion.update_explanation.len(),
                "Parsed comprehension update suggestion"
            );
            Generated::Produced(suggestion)
        }
        Err(e) => {
            error!(error = %e, raw = %text, "Failed to parse comprehension update suggestion");
            Generated::fallback(ComprehensionUpdateSuggestion::default(), e.to_string())
        }
    }
}
