use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "study")]
#[command(about = "Daily learning tasks: serve the HTTP entry points or run a task once", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP entry points (bind address from BIND_ADDR unless given).
    Serve {
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Run one task over the window ending now and exit.
    Run {
        #[arg(value_enum)]
        task: TaskKind,
        /// Focus theme for `knowledge`.
        #[arg(short, long)]
        theme: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    Daily,
    PerUser,
    Insights,
    Knowledge,
}
