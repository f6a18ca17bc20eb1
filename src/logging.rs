//! File logging for the TUI.
//!
//! The terminal belongs to ratatui, so tracing output goes to
//! `nxtwatch.log` in the data dir through a non-blocking appender.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE: &str = "nxtwatch.log";

/// Pick the filter directive: `RUST_LOG`, then the CLI flag, then prefs, then `info`.
pub fn resolve_filter(env: Option<&str>, cli: Option<&str>, prefs: Option<&str>) -> String {
  [env, cli, prefs]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|s| !s.is_empty())
    .unwrap_or("info")
    .to_string()
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn init_logging(dir: &Path, directive: &str) -> Result<WorkerGuard> {
  std::fs::create_dir_all(dir).with_context(|| format!("Failed to create log directory {}", dir.display()))?;
  let appender = tracing_appender::rolling::never(dir, LOG_FILE);
  let (writer, guard) = tracing_appender::non_blocking(appender);
  let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(false))
    .try_init()
    .context("Failed to install tracing subscriber")?;
  Ok(guard)
}
