//! File-backed tracing setup. The terminal is owned by the TUI, so log output
//! goes to `chord-finder.log` in the user's data directory instead.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log file name inside the data directory.
const LOG_FILE_NAME: &str = "chord-finder.log";

/// Directory holding the log file, falling back to the OS temp dir when no
/// home directory can be resolved.
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("", "", "chord-finder")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir)
}

/// Install the global subscriber and return the path being written to.
pub fn init_logging(filter: &str) -> Result<PathBuf> {
    let dir = log_dir();
    fs::create_dir_all(&dir).context("failed to create log directory")?;
    let path = dir.join(LOG_FILE_NAME);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(filter).context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(path)
}
