//! Tracing initialization: fmt layer with level, target and fields, written to stdout and,
//! when configured, appended to a log file as well.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan, fmt::writer::MakeWriterExt, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Registry,
};

/// Installs the global tracing subscriber.
///
/// Level comes from `RUST_LOG` (default `info`). Load `.env` before calling this or
/// `RUST_LOG` from the file is ignored. With `log_file_path`, every line is tee'd to that file.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    match log_file_path {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(file);
            Registry::default()
                .with(env_filter)
                .with(fmt_layer.with_writer(io::stdout.and(file)))
                .try_init()
        }
        None => Registry::default()
            .with(env_filter)
            .with(fmt_layer.with_writer(io::stdout))
            .try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
