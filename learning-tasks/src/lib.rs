//! # learning-tasks
//!
//! The services that turn the day's [`ConversationDocument`](study_core::ConversationDocument)
//! into model output, and the pipelines that fetch, reconstruct, generate and persist.
//!
//! Every service returns a [`Generated`] value: either the model's output or a safe default
//! together with the reason it was substituted. Only fetch and persistence failures are
//! errors ([`TaskError`]).

mod comprehension;
mod daily;
mod error;
mod generated;
mod insight;
mod json_reply;
mod knowledge;
mod quiz;
mod report;

pub use comprehension::update_comprehension;
pub use daily::{DailyDigest, DailyTasks, UserRunResult, UserRunStatus, WindowSettings};
pub use error::TaskError;
pub use generated::Generated;
pub use insight::{generate_learning_insights, INSIGHT_FALLBACK};
pub use json_reply::strip_code_fence;
pub use knowledge::{generate_advanced_knowledge, KNOWLEDGE_FALLBACK};
pub use quiz::{make_daily_quizzes, parse_quizzes};
pub use report::{make_daily_report, REPORT_FALLBACK};
