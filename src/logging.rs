//! Process-wide logging setup.
//!
//! Console output by default; passing a log directory writes to
//! `noterfy.log` in that directory instead, without ANSI codes.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the log file created under the log directory.
pub const LOG_FILE_NAME: &str = "noterfy.log";

/// Initialize the tracing subscriber.
///
/// The filter defaults to `info` and can be overridden via `RUST_LOG`.
/// Repeated calls are harmless; only the first installation wins.
pub fn init(log_dir: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let file_layer = fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .try_init()
                .ok();
        }
        None => {
            let console_layer = fmt::layer().with_target(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .try_init()
                .ok();
        }
    }

    Ok(())
}
