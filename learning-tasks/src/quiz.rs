//! Follow-up quizzes built from the day's conversation and report.

use llm_client::{LlmClient, ResponseFormat};
use serde_json::Value;
use study_core::{ConversationDocument, Quiz};
use tracing::{error, info, warn};

use crate::error::TaskError;
use crate::generated::Generated;
use crate::json_reply::strip_code_fence;

/// Parses the model's quiz reply.
///
/// Accepts a JSON array of items or an object holding the array under `questions`. Items
/// without string `question` and `answer` are skipped. Any other shape is a parse error.
pub fn parse_quizzes(text: &str) -> Result<Vec<Quiz>, TaskError> {
    let value: Value = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| TaskError::Parse(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(TaskError::Parse(
                    "expected a \"questions\" array in the quiz object".to_string(),
                ))
            }
        },
        other => {
            return Err(TaskError::Parse(format!(
                "expected a JSON array or object, got {}",
                json_kind(&other)
            )))
        }
    };

    let mut quizzes = Vec::with_capacity(items.len());
    for item in items {
        let question = item.get("question").and_then(Value::as_str);
        let answer = item.get("answer").and_then(Value::as_str);
        match (question, answer) {
            (Some(question), Some(answer)) => quizzes.push(Quiz {
                question: question.to_string(),
                answer: answer.to_string(),
            }),
            _ => warn!(item = %item, "Skipping quiz item missing question or answer"),
        }
    }
    Ok(quizzes)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Generates quizzes; generation or parse failure yields an empty list.
pub async fn make_daily_quizzes(
    llm: &dyn LlmClient,
    document: &ConversationDocument,
    report: &str,
) -> Generated<Vec<Quiz>> {
    let document_json = match document.to_json_pretty() {
        Ok(json) => json,
        Err(e) => return Generated::fallback(Vec::new(), e.to_string()),
    };

    let text = match llm
        .generate(
            prompt::daily_quiz_messages(&document_json, report),
            ResponseFormat::Json,
        )
        .await
    {
        Ok(text) => text,
        Err(e) => {
            error!(error = %e, "Quiz generation failed");
            return Generated::fallback(Vec::new(), e.to_string());
        }
    };

    match parse_quizzes(&text) {
        Ok(quizzes) => {
            if quizzes.is_empty() {
                info!("No valid quizzes were found in the response");
            } else {
                info!(count = quizzes.len(), "Parsed quizzes");
            }
            Generated::Produced(quizzes)
        }
        Err(e) => {
            error!(error = %e, raw = %text, "Failed to parse quizzes");
            Generated::fallback(Vec::new(), e.to_string())
        }
    }
}
