//! File-backed logging setup
//!
//! The TUI owns the terminal, so log records go to a file under the user's
//! local data directory. Default level is `info`; override with RUST_LOG.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Get the log file path
pub fn path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .context("Could not determine data directory")?
        .join("gesturedeck");
    Ok(data_dir.join("gesturedeck.log"))
}

/// Install the global tracing subscriber
pub fn init() -> Result<()> {
    let path = path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
