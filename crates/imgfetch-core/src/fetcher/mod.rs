//! Per-URL fetch orchestration.
//!
//! One `fetch` call covers the whole pipeline: GET, header validation,
//! duplicate scan, filename resolution, atomic write. Every failure is
//! absorbed here and surfaces as a [`FetchOutcome`]; nothing propagates to
//! the session loop.

mod error;
mod headers;
mod transfer;

pub use error::TransferError;
pub use transfer::{FetchedResource, ResponseHead, TransferOptions};

use std::fmt;
use std::fs;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::validate::validate_headers;
use crate::{dedup, storage, url_model};

/// Slack on top of the configured limit before a transfer is cut off, so a
/// body a few bytes over the line is rejected by the validator (with a size
/// figure) rather than by a mid-stream abort.
const BODY_CAP_SLACK: u64 = 64 * 1024;

/// Outcome of fetching one URL. Exactly one is produced per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Image saved; `filename` is the final on-disk name.
    Downloaded { filename: String, bytes: u64 },
    /// Identical content already stored under `existing`; nothing written.
    DuplicateSkipped { existing: String },
    /// Response rejected before persisting (content type or size).
    ValidationFailed { reason: String },
    /// Transport-level failure (timeout, connect, HTTP status).
    NetworkFailed { reason: String },
    /// Local filesystem failure.
    IoFailed { reason: String },
}

impl FetchOutcome {
    pub fn is_downloaded(&self) -> bool {
        matches!(self, FetchOutcome::Downloaded { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FetchOutcome::DuplicateSkipped { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_downloaded() && !self.is_skipped()
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Downloaded { filename, bytes } => {
                write!(
                    f,
                    "Successfully fetched: {} ({:.1} KB)",
                    filename,
                    *bytes as f64 / 1024.0
                )
            }
            FetchOutcome::DuplicateSkipped { existing } => {
                write!(f, "Image already exists as: {} (duplicate skipped)", existing)
            }
            FetchOutcome::ValidationFailed { reason } => {
                write!(f, "Validation failed: {}", reason)
            }
            FetchOutcome::NetworkFailed { reason } => write!(f, "Download failed: {}", reason),
            FetchOutcome::IoFailed { reason } => write!(f, "File error: {}", reason),
        }
    }
}

/// Seam between the session loop and the network, so sessions can be driven
/// by a scripted stand-in under test.
pub trait FetchImage {
    fn fetch(&self, url: &str) -> FetchOutcome;
}

/// The real fetcher: blocking GET per URL against a fixed configuration.
pub struct Fetcher {
    cfg: FetchConfig,
}

impl Fetcher {
    pub fn new(cfg: FetchConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.cfg
    }
}

impl FetchImage for Fetcher {
    fn fetch(&self, url: &str) -> FetchOutcome {
        let dir = &self.cfg.download_dir;
        if let Err(err) = fs::create_dir_all(dir) {
            return FetchOutcome::IoFailed {
                reason: format!("could not create {}: {}", dir.display(), err),
            };
        }

        let max_bytes = self.cfg.max_image_bytes;
        let opts = TransferOptions {
            timeout: Duration::from_secs(self.cfg.request_timeout_secs),
            user_agent: self.cfg.user_agent.clone(),
            max_body_bytes: max_bytes + BODY_CAP_SLACK,
        };

        tracing::debug!("fetching {}", url);
        let resource = match transfer::get(url, &opts, |head| {
            validate_headers(head.content_type.as_deref(), head.content_length, max_bytes).valid
        }) {
            Ok(resource) => resource,
            Err(TransferError::BodyTooLarge(_)) => {
                return FetchOutcome::ValidationFailed {
                    reason: format!(
                        "File size exceeds safety limit of {}MB (download aborted)",
                        max_bytes / (1024 * 1024)
                    ),
                }
            }
            Err(err) => {
                tracing::debug!("transfer failed for {}: {}", url, err);
                return FetchOutcome::NetworkFailed {
                    reason: err.to_string(),
                };
            }
        };

        // Declared headers first, then the byte count actually read; a server
        // lying about Content-Length fails the second check.
        let head = &resource.head;
        let declared = validate_headers(head.content_type.as_deref(), head.content_length, max_bytes);
        if !declared.valid {
            return FetchOutcome::ValidationFailed {
                reason: declared.reason,
            };
        }
        let actual = validate_headers(
            head.content_type.as_deref(),
            Some(resource.body.len() as u64),
            max_bytes,
        );
        if !actual.valid {
            return FetchOutcome::ValidationFailed {
                reason: actual.reason,
            };
        }

        if self.cfg.check_duplicates {
            match dedup::find_duplicate(&resource.body, dir) {
                Ok(Some(existing)) => return FetchOutcome::DuplicateSkipped { existing },
                Ok(None) => {}
                Err(err) => {
                    return FetchOutcome::IoFailed {
                        reason: format!("duplicate scan failed: {:#}", err),
                    }
                }
            }
        }

        let filename = url_model::resolve_filename(url, head.content_type.as_deref());
        let dest = storage::unique_destination(dir, &filename);
        match storage::write_atomic(&dest, &resource.body) {
            Ok(()) => {
                let saved = dest
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or(filename);
                tracing::info!("saved {} ({} bytes)", saved, resource.body.len());
                FetchOutcome::Downloaded {
                    filename: saved,
                    bytes: resource.body.len() as u64,
                }
            }
            Err(err) => FetchOutcome::IoFailed {
                reason: format!("could not save image: {:#}", err),
            },
        }
    }
}
