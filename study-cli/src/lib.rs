//! # study-cli
//!
//! Entry points for the daily learning tasks: env config, the axum router the scheduler
//! calls, and the clap definitions for one-shot runs.

pub mod cli;
pub mod config;
pub mod server;

pub use cli::{Cli, Commands, TaskKind};
pub use config::AppConfig;
pub use server::router;
