//! Unit tests for the learning task prompt builders.
//!
//! Verifies message roles, embedded JSON blocks and the optional theme.
//! External interactions: none (pure function tests).

use prompt::learning::{ADVANCED_KNOWLEDGE_SYSTEM, QUIZ_SYSTEM, REPORT_SYSTEM};
use prompt::{
    advanced_knowledge_messages, comprehension_update_messages, daily_quiz_messages,
    daily_report_messages, learning_insight_messages, ChatMessage, MessageRole,
};

const DOC: &str = r#"{"messages_by_room": {}, "posts_conversations": []}"#;

fn roles(messages: &[ChatMessage]) -> Vec<MessageRole> {
    messages.iter().map(|m| m.role).collect()
}

/// **Test: Every builder returns system instruction then one user prompt.**
#[test]
fn builders_return_system_then_user() {
    let all = vec![
        comprehension_update_messages("[]", DOC),
        daily_report_messages(DOC),
        daily_quiz_messages(DOC, "report"),
        learning_insight_messages(DOC),
        advanced_knowledge_messages(DOC, None),
    ];
    for messages in all {
        assert_eq!(roles(&messages), vec![MessageRole::System, MessageRole::User]);
    }
}

/// **Test: The conversation document is embedded as a fenced JSON block.**
#[test]
fn report_prompt_embeds_fenced_document() {
    let messages = daily_report_messages(DOC);
    assert_eq!(messages[0].content, REPORT_SYSTEM);
    assert!(messages[1].content.contains(&format!("```json\n{}\n```", DOC)));
}

/// **Test: The comprehension prompt carries both snapshot and document, and the reply schema.**
#[test]
fn comprehension_prompt_contains_snapshot_document_and_schema() {
    let snapshot = r#"[{"subject":"数学"}]"#;
    let messages = comprehension_update_messages(snapshot, DOC);
    let user = &messages[1].content;
    assert!(user.contains(snapshot));
    assert!(user.contains(DOC));
    assert!(user.contains("\"levelUpField\""));
    assert!(user.contains("\"updateExplanation\""));
    let snapshot_pos = user.find(snapshot).unwrap();
    let doc_pos = user.find(DOC).unwrap();
    assert!(snapshot_pos < doc_pos);
}

/// **Test: The quiz prompt includes the report text and asks for a questions object.**
#[test]
fn quiz_prompt_includes_report() {
    let messages = daily_quiz_messages(DOC, "今日は二次関数を学んだ");
    assert_eq!(messages[0].content, QUIZ_SYSTEM);
    assert!(messages[1].content.contains("今日は二次関数を学んだ"));
    assert!(messages[1].content.contains("\"questions\""));
}

/// **Test: Insight prompt lists the four sections.**
#[test]
fn insight_prompt_has_sections() {
    let user = &learning_insight_messages(DOC)[1].content;
    for section in [
        "【関連分野と応用例】",
        "【より深い理解のためのトピック】",
        "【実践的な演習と問題】",
        "【日常生活や他の分野との関連】",
    ] {
        assert!(user.contains(section), "missing {}", section);
    }
}

/// **Test: A theme is mentioned only when non-blank.**
#[test]
fn advanced_knowledge_theme_is_optional() {
    let with_theme = advanced_knowledge_messages(DOC, Some("確率"));
    assert_eq!(with_theme[0].content, ADVANCED_KNOWLEDGE_SYSTEM);
    assert!(with_theme[1].content.contains("「確率」"));

    let blank = advanced_knowledge_messages(DOC, Some("   "));
    let none = advanced_knowledge_messages(DOC, None);
    assert_eq!(blank, none);
    assert!(!none[1].content.contains("テーマ"));
}

/// **Test: ChatMessage constructors set the matching role.**
#[test]
fn chat_message_constructors() {
    assert_eq!(ChatMessage::system("s").role, MessageRole::System);
    assert_eq!(ChatMessage::user("u").role, MessageRole::User);
    assert_eq!(ChatMessage::assistant("a").role, MessageRole::Assistant);
}
