//! Logging initialization utilities.

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::LogLevel;

/// Initialize logging with the specified level.
///
/// Logs go to stderr; stdout carries the event stream. `RUST_LOG`, when set,
/// overrides the level.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let default_level = LevelFilter::from_level(level.into());
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}
