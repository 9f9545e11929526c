use std::path::PathBuf;

use anyhow::{Result, anyhow};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE: &str = "fastagent.log";

/// Route tracing output to a log file; the terminal belongs to the TUI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Returns the log
/// file path.
pub fn init() -> Result<PathBuf> {
    let log_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("Could not determine data directory"))?
        .join("fastagent")
        .join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::never(&log_dir, LOG_FILE);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()?;

    let path = log_dir.join(LOG_FILE);
    tracing::debug!(path = %path.display(), "tracing initialized");
    Ok(path)
}
