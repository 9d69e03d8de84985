//! Interactive session loop and batch processing.
//!
//! URLs are processed strictly in input order, one request at a time; a
//! failure never stops the rest of the batch. Reader and writer are injected
//! so the whole loop runs against in-memory I/O under test.

use anyhow::Result;
use imgfetch_core::fetcher::{FetchImage, FetchOutcome};
use std::io::{BufRead, Write};

/// Running counts for one session, printed as the final summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionTally {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SessionTally {
    pub fn record(&mut self, outcome: &FetchOutcome) {
        if outcome.is_downloaded() {
            self.downloaded += 1;
        } else if outcome.is_skipped() {
            self.skipped += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Prompts for one or many URLs, then processes them.
///
/// Empty input (including EOF) exits gracefully with a zeroed tally; it is
/// never an error.
pub fn run_interactive<R, W, F>(input: &mut R, output: &mut W, fetcher: &F) -> Result<SessionTally>
where
    R: BufRead,
    W: Write,
    F: FetchImage,
{
    writeln!(output, "imgfetch - collect images from the web")?;
    write!(output, "Download [s]ingle image or [m]ultiple images? (s/m): ")?;
    output.flush()?;
    let mode = read_trimmed_line(input)?;

    let urls = if mode.eq_ignore_ascii_case("m") {
        writeln!(output, "Enter image URLs (one per line, empty line to finish):")?;
        let mut urls = Vec::new();
        loop {
            write!(output, "URL: ")?;
            output.flush()?;
            let line = read_trimmed_line(input)?;
            if line.is_empty() {
                break;
            }
            urls.push(line);
        }
        urls
    } else {
        write!(output, "Image URL: ")?;
        output.flush()?;
        let url = read_trimmed_line(input)?;
        if url.is_empty() {
            Vec::new()
        } else {
            vec![url]
        }
    };

    if urls.is_empty() {
        writeln!(output, "No URLs provided.")?;
        return Ok(SessionTally::default());
    }

    run_batch(&urls, output, fetcher)
}

/// Fetches each URL in order, printing progress and outcome lines, then the summary.
pub fn run_batch<W, F>(urls: &[String], output: &mut W, fetcher: &F) -> Result<SessionTally>
where
    W: Write,
    F: FetchImage,
{
    let mut tally = SessionTally::default();
    let total = urls.len();

    for (i, url) in urls.iter().enumerate() {
        if total > 1 {
            writeln!(output, "[{}/{}] Processing: {}...", i + 1, total, url)?;
        }
        let outcome = fetcher.fetch(url);
        writeln!(output, "{}", outcome)?;
        tally.record(&outcome);
    }

    writeln!(
        output,
        "Summary: {} downloaded, {} skipped (duplicates), {} failed",
        tally.downloaded, tally.skipped, tally.failed
    )?;
    Ok(tally)
}

fn read_trimmed_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
