//! CLI for the imgfetch image downloader.

pub mod session;

use anyhow::{Context, Result};
use clap::Parser;
use imgfetch_core::config;
use imgfetch_core::fetcher::Fetcher;
use std::io;
use std::path::PathBuf;

/// Top-level CLI. With no URL arguments an interactive session starts;
/// defaults reproduce the interactive behavior exactly.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "Fetch images from the web with validation and duplicate detection", long_about = None)]
pub struct Cli {
    /// Image URLs to fetch. With none given, prompts interactively.
    pub urls: Vec<String>,

    /// Destination directory (default: Fetched_Images).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Skip the duplicate-content check.
    #[arg(long)]
    pub no_dedup: bool,

    /// Print the SHA-256 content digest of a local file and exit.
    #[arg(long, value_name = "FILE")]
    pub checksum: Option<PathBuf>,
}

pub fn run_from_args() -> Result<()> {
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    if let Some(path) = cli.checksum {
        let digest = imgfetch_core::checksum::sha256_path(&path)?;
        println!("{}  {}", digest, path.display());
        return Ok(());
    }

    let mut cfg = config::load_or_init()?;
    if let Some(dir) = cli.dir {
        cfg.download_dir = dir;
    }
    if cli.no_dedup {
        cfg.check_duplicates = false;
    }
    tracing::debug!("loaded config: {:?}", cfg);

    // The one fatal setup step: without the base directory no fetch can
    // succeed, so this aborts the run instead of failing URL by URL.
    std::fs::create_dir_all(&cfg.download_dir).with_context(|| {
        format!("create download directory {}", cfg.download_dir.display())
    })?;

    let fetcher = Fetcher::new(cfg);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let tally = if cli.urls.is_empty() {
        session::run_interactive(&mut stdin.lock(), &mut stdout, &fetcher)?
    } else {
        session::run_batch(&cli.urls, &mut stdout, &fetcher)?
    };
    tracing::info!(
        "session complete: {} downloaded, {} skipped, {} failed",
        tally.downloaded,
        tally.skipped,
        tally.failed
    );

    Ok(())
}

#[cfg(test)]
mod tests;
