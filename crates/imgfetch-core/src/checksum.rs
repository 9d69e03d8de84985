//! SHA-256 content digests used as the duplicate-detection key.
//!
//! Two byte sequences are treated as the same image iff their digests match;
//! filenames play no part in equality.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const READ_BUF_SIZE: usize = 64 * 1024;

/// SHA-256 of an in-memory byte slice, as lowercase hex.
pub fn sha256_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// SHA-256 of a file on disk, as lowercase hex.
/// Streams through a fixed-size buffer, so memory use does not grow with the file.
pub fn sha256_path(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut reader = BufReader::with_capacity(READ_BUF_SIZE, file);
    let mut hasher = Sha256::new();
    std::io::copy(&mut reader, &mut hasher)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(hex::encode(hasher.finalize()))
}
