//! HTTP entry points hit by the scheduler. Each route runs one task synchronously and
//! answers with plain text: 200 when the run finished (also when there was nothing to do),
//! 500 when it failed.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use chrono::Utc;
use learning_tasks::DailyTasks;
use serde::Deserialize;
use tracing::{error, info};

pub const DAILY_DONE: &str = "デイリータスクを実行し、結果をログに出力しました。";
pub const NO_DATA: &str = "対象期間の会話データはありませんでした。";
pub const INTERNAL_ERROR: &str = "内部エラーが発生しました。";

pub fn router(tasks: DailyTasks) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/execute_daily_tasks",
            get(execute_daily_tasks).post(execute_daily_tasks),
        )
        .route(
            "/execute_daily_tasks_per_user",
            get(execute_daily_tasks_per_user).post(execute_daily_tasks_per_user),
        )
        .route(
            "/generate_learning_insights",
            get(generate_learning_insights).post(generate_learning_insights),
        )
        .route(
            "/generate_advanced_knowledge",
            get(generate_advanced_knowledge).post(generate_advanced_knowledge),
        )
        .with_state(tasks)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn execute_daily_tasks(State(tasks): State<DailyTasks>) -> (StatusCode, String) {
    info!("Received request: execute_daily_tasks");
    match tasks.run_all(Utc::now()).await {
        Ok(Some(_)) => (StatusCode::OK, DAILY_DONE.to_string()),
        Ok(None) => (StatusCode::OK, NO_DATA.to_string()),
        Err(e) => internal_error("execute_daily_tasks", e),
    }
}

/// Answers with the per-user results as JSON; individual user failures are inside the body.
async fn execute_daily_tasks_per_user(State(tasks): State<DailyTasks>) -> (StatusCode, String) {
    info!("Received request: execute_daily_tasks_per_user");
    let results = match tasks.run_per_user(Utc::now()).await {
        Ok(results) => results,
        Err(e) => return internal_error("execute_daily_tasks_per_user", e),
    };
    match serde_json::to_string_pretty(&results) {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => internal_error("execute_daily_tasks_per_user", e),
    }
}

async fn generate_learning_insights(State(tasks): State<DailyTasks>) -> (StatusCode, String) {
    info!("Received request: generate_learning_insights");
    match tasks.run_insights(Utc::now()).await {
        Ok(Some(insights)) => (StatusCode::OK, insights.into_value()),
        Ok(None) => (StatusCode::OK, NO_DATA.to_string()),
        Err(e) => internal_error("generate_learning_insights", e),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeQuery {
    pub theme: Option<String>,
}

async fn generate_advanced_knowledge(
    State(tasks): State<DailyTasks>,
    Query(query): Query<KnowledgeQuery>,
) -> (StatusCode, String) {
    info!(theme = ?query.theme, "Received request: generate_advanced_knowledge");
    match tasks
        .run_advanced_knowledge(Utc::now(), query.theme.as_deref())
        .await
    {
        Ok(Some(knowledge)) => (StatusCode::OK, knowledge.into_value()),
        Ok(None) => (StatusCode::OK, NO_DATA.to_string()),
        Err(e) => internal_error("generate_advanced_knowledge", e),
    }
}

fn internal_error(route: &str, e: impl std::fmt::Display) -> (StatusCode, String) {
    error!(route, error = %e, "Task run failed");
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
}
