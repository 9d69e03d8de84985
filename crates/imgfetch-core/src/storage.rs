//! Disk I/O and file lifecycle.
//!
//! Bodies are written to a `.part` temp file and renamed into place, so a
//! failed write never leaves a partial image in the destination directory.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Picks a free destination for `filename` inside `dir`.
///
/// If the name is taken (by different content; duplicates are handled before
/// this point), a numeric suffix is inserted before the extension:
/// `img.png`, `img_1.png`, `img_2.png`, ...
pub fn unique_destination(dir: &Path, filename: &str) -> PathBuf {
    let first = dir.join(filename);
    if !first.exists() {
        return first;
    }

    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    };

    for n in 1.. {
        let candidate = match ext {
            Some(ext) => dir.join(format!("{}_{}.{}", stem, n, ext)),
            None => dir.join(format!("{}_{}", stem, n)),
        };
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("exhausted numeric suffixes");
}

/// Writes `data` to `final_path` atomically: temp file, sync, rename.
/// On any failure the temp file is removed before the error is returned.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> Result<()> {
    let tmp = temp_path(final_path);

    let write = || -> Result<()> {
        let mut file = fs::File::create(&tmp)
            .with_context(|| format!("create temp file {}", tmp.display()))?;
        file.write_all(data)
            .with_context(|| format!("write {}", tmp.display()))?;
        file.sync_all()
            .with_context(|| format!("sync {}", tmp.display()))?;
        Ok(())
    };

    if let Err(err) = write() {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    if let Err(err) = fs::rename(&tmp, final_path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| {
            format!("rename {} to {}", tmp.display(), final_path.display())
        });
    }

    Ok(())
}
