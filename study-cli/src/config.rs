use std::env;
use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use chrono::FixedOffset;
use learning_tasks::WindowSettings;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./study.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration, loaded from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub log_file: Option<String>,
    pub bind_addr: String,
    pub window_hours: i64,
    pub window_offset_hours: i32,
}

impl AppConfig {
    /// Reads `DATABASE_URL`, `LOG_FILE`, `BIND_ADDR`, `WINDOW_HOURS` and
    /// `WINDOW_OFFSET_HOURS`. Unset values take their defaults; unparseable numbers are errors.
    pub fn load() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.trim().is_empty());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let window_hours = match env::var("WINDOW_HOURS") {
            Ok(v) => v
                .trim()
                .parse()
                .with_context(|| format!("WINDOW_HOURS is not an integer: {}", v))?,
            Err(_) => 24,
        };
        let window_offset_hours = match env::var("WINDOW_OFFSET_HOURS") {
            Ok(v) => v
                .trim()
                .parse()
                .with_context(|| format!("WINDOW_OFFSET_HOURS is not an integer: {}", v))?,
            Err(_) => 9,
        };

        Ok(Self {
            database_url,
            log_file,
            bind_addr,
            window_hours,
            window_offset_hours,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            bail!("DATABASE_URL must not be empty");
        }
        if self.window_hours <= 0 {
            bail!("WINDOW_HOURS must be positive, got {}", self.window_hours);
        }
        if !(-23..=23).contains(&self.window_offset_hours) {
            bail!(
                "WINDOW_OFFSET_HOURS must be within -23..=23, got {}",
                self.window_offset_hours
            );
        }
        self.bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR is not a socket address: {}", self.bind_addr))?;
        Ok(())
    }

    pub fn window_settings(&self) -> Result<WindowSettings> {
        let offset = FixedOffset::east_opt(self.window_offset_hours * 3600)
            .with_context(|| format!("invalid offset: {}h", self.window_offset_hours))?;
        Ok(WindowSettings {
            hours: self.window_hours,
            offset,
        })
    }
}
