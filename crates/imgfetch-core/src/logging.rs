//! Logging init: file under the XDG state dir, or graceful fallback to stderr.
//!
//! Stdout belongs to the interactive session, so log lines go to
//! `~/.local/state/imgfetch/imgfetch.log` instead.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,imgfetch=debug"))
}

/// Log file location: directly under the prefixed XDG state home.
fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.get_state_home().join("imgfetch.log"))
}

/// Initialize structured logging to `~/.local/state/imgfetch/imgfetch.log`.
/// Returns Err if the log file cannot be opened so the caller can fall back to stderr.
pub fn init() -> Result<()> {
    let log_file_path = log_file_path()?;
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    // Each log line gets a fresh handle; if the clone fails mid-run, the line
    // lands on stderr rather than being lost.
    let make_writer = move || -> Box<dyn io::Write> {
        match file.try_clone() {
            Ok(f) => Box::new(f),
            Err(_) => Box::new(io::stderr()),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(make_writer)
        .with_ansi(false)
        .init();

    tracing::info!("imgfetch logging initialized at {}", log_file_path.display());

    Ok(())
}

/// Initialize logging to stderr only (no file). Use when init() fails so the CLI doesn't crash.
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
