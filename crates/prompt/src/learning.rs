//! Prompts for the learning tasks: comprehension update, daily report, quizzes, learning
//! insights and advanced knowledge.
//!
//! The platform's learners read Japanese, so instructions and expected outputs are Japanese.

use crate::ChatMessage;

pub const COMPREHENSION_SYSTEM: &str = "あなたは学習データ分析の専門家です。\
ユーザーの現在の学力データと本日の学習記録（会話履歴）を読み比べ、\
本日の学習を反映して更新すべき箇所を特定し、指定のJSON形式で提案してください。";

pub const REPORT_SYSTEM: &str = "あなたは経験豊富な学習メンターです。\
会話履歴から、ユーザーが今日何を学び、どこでつまずき、どれだけ前進したかを具体的に指摘してください。\
そのうえで、次の学習に役立つ具体的なアドバイスを、励ますような親しみやすい言葉で伝えてください。";

pub const QUIZ_SYSTEM: &str = "あなたは経験豊富な学習メンターです。\
学習者の理解度に合った、定着に効果的な問題を作るのが得意です。";

pub const INSIGHT_SYSTEM: &str = "あなたは教育の専門家です。\
ユーザーの学習記録（会話履歴）を分析し、次の観点から発展的な情報やアドバイスを自然な文章で提供してください。\n\
1. 学習内容の関連分野や応用例\n\
2. より深い理解のための追加トピック\n\
3. 実践的な演習や問題の提案\n\
4. 日常生活や他分野と結びつける方法";

pub const ADVANCED_KNOWLEDGE_SYSTEM: &str = "あなたは知識豊富な教育アシスタントです。\
ユーザーの学習記録を深く読み込み、関連する高度な概念、学術的な背景、他分野での応用、\
まだ気づいていないかもしれない問いなどを示して、さらなる探究を促してください。\
出力は読み応えのある自然な文章にしてください。";

/// Wraps serialized JSON in a fenced block.
fn fenced_json(json: &str) -> String {
    format!("```json\n{}\n```", json)
}

/// Asks which fields leveled up and which explanations to rewrite, given the current
/// comprehension snapshot and the day's conversation.
///
/// The reply is expected as `{"levelUpField": [...], "updateExplanation": {...}}`.
pub fn comprehension_update_messages(
    comprehension_json: &str,
    conversation_json: &str,
) -> Vec<ChatMessage> {
    let prompt = format!(
        "現在のユーザーの学力データ(JSON):\n{}\n\n\
         本日の学習記録・会話履歴(JSON):\n{}\n\n\
         これらに基づき、学力データのうち本日の学習を反映して更新すべき箇所\
         （各分野の comprehension の向上や explanation の書き換え）を特定してください。\n\
         次のJSON形式で出力してください:\n\
         {{\n  \"levelUpField\": [\"理解度が向上した分野名\"],\n  \
         \"updateExplanation\": {{\"説明を更新すべき分野名\": \"新しい説明文\"}}\n}}\n\
         更新がない場合は levelUpField を []、updateExplanation を {{}} にしてください。",
        fenced_json(comprehension_json),
        fenced_json(conversation_json),
    );
    vec![ChatMessage::system(COMPREHENSION_SYSTEM), ChatMessage::user(prompt)]
}

/// Asks for a free-text summary of the day with advice.
pub fn daily_report_messages(conversation_json: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "会話履歴:\n{}\n\n上記の会話履歴に基づいて、本日の学習のまとめとアドバイスを作成してください。",
        fenced_json(conversation_json),
    );
    vec![ChatMessage::system(REPORT_SYSTEM), ChatMessage::user(prompt)]
}

/// Asks for follow-up questions built from the conversation and the day's report.
///
/// The reply is expected as `{"questions": [{"question": ..., "answer": ...}]}`.
pub fn daily_quiz_messages(conversation_json: &str, report: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "会話履歴:\n{}\n\n日報:\n{}\n\n\
         この会話と日報をもとに、ユーザーの学力向上に役立つ問題を数問作成してください。\n\
         各問題は question と answer を含め、次のJSON形式で返してください:\n\
         {{\"questions\": [{{\"question\": \"問題文\", \"answer\": \"解答\"}}]}}",
        fenced_json(conversation_json),
        report,
    );
    vec![ChatMessage::system(QUIZ_SYSTEM), ChatMessage::user(prompt)]
}

/// Asks for supplementary insights in four fixed sections.
pub fn learning_insight_messages(conversation_json: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "ユーザーの学習記録（会話履歴）は次の通りです(JSON):\n{}\n\n\
         この学習内容に関連して、次の見出しで発展的な情報を自然な文章で提供してください。\n\n\
         【関連分野と応用例】\n学習内容に関連する分野や実際の応用例\n\n\
         【より深い理解のためのトピック】\n追加で学ぶと良いトピック\n\n\
         【実践的な演習と問題】\n定着のための具体的な演習や実践方法\n\n\
         【日常生活や他の分野との関連】\n日常や他分野での活用例",
        fenced_json(conversation_json),
    );
    vec![ChatMessage::system(INSIGHT_SYSTEM), ChatMessage::user(prompt)]
}

/// Asks for deeper, curiosity-driven material; `theme` narrows the focus when given.
pub fn advanced_knowledge_messages(
    conversation_json: &str,
    theme: Option<&str>,
) -> Vec<ChatMessage> {
    let mut prompt = format!(
        "ユーザーの学習記録（会話履歴）は次の通りです(JSON):\n{}\n\n",
        fenced_json(conversation_json),
    );
    if let Some(theme) = theme.map(str::trim).filter(|t| !t.is_empty()) {
        prompt.push_str(&format!("特に「{}」というテーマに焦点を当ててください。\n", theme));
    }
    prompt.push_str(
        "この学習内容に基づいて、知的好奇心を刺激し学習意欲を高めるような発展的な知識や洞察を、\
         具体的な説明や例を交えて読みやすい文章で提供してください。",
    );
    vec![
        ChatMessage::system(ADVANCED_KNOWLEDGE_SYSTEM),
        ChatMessage::user(prompt),
    ]
}
