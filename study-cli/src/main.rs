//! study: serve the daily learning task endpoints, or run one task from the shell.
//! Config from env (and `.env`); LLM credentials via `LLM_API_KEY` / `GEMINI_API_KEY`.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use learning_tasks::DailyTasks;
use llm_client::{EnvLlmConfig, OpenAILlmClient};
use storage::StudyRepository;
use study_cli::{router, AppConfig, Cli, Commands, TaskKind};
use study_core::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(config.log_file.as_deref())?;

    let tasks = build_tasks(&config).await?;

    match cli.command {
        Commands::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!(addr = %addr, "Serving daily task endpoints");
            axum::serve(listener, router(tasks)).await?;
            Ok(())
        }
        Commands::Run { task, theme } => run_once(&tasks, task, theme.as_deref()).await,
    }
}

async fn build_tasks(config: &AppConfig) -> Result<DailyTasks> {
    let repo = Arc::new(
        StudyRepository::new(&config.database_url)
            .await
            .with_context(|| format!("Failed to open database {}", config.database_url))?,
    );
    let llm_config = EnvLlmConfig::from_env()?;
    let llm = Arc::new(OpenAILlmClient::from_config(&llm_config));
    info!(model = %llm.model(), "LLM client ready");

    Ok(DailyTasks::new(
        repo.clone(),
        repo,
        llm,
        config.window_settings()?,
    ))
}

async fn run_once(tasks: &DailyTasks, task: TaskKind, theme: Option<&str>) -> Result<()> {
    let now = Utc::now();
    match task {
        TaskKind::Daily => match tasks.run_all(now).await? {
            Some(digest) => println!("{}", digest.report.value()),
            None => println!("No conversations in window"),
        },
        TaskKind::PerUser => {
            let results = tasks.run_per_user(now).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        TaskKind::Insights => match tasks.run_insights(now).await? {
            Some(insights) => println!("{}", insights.value()),
            None => println!("No conversations in window"),
        },
        TaskKind::Knowledge => match tasks.run_advanced_knowledge(now, theme).await? {
            Some(knowledge) => println!("{}", knowledge.value()),
            None => println!("No conversations in window"),
        },
    }
    Ok(())
}
