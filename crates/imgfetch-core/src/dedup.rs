//! Content-hash duplicate detection against the destination directory.
//!
//! The scan is non-recursive and re-hashes every existing file on each call.
//! O(n) per fetch is accepted at this scale; a persistent index would change
//! nothing observable.

use anyhow::{Context, Result};
use std::path::Path;

use crate::checksum;

/// Returns the name of an existing file in `dir` whose content digest matches
/// `content`, or `None` if the content is new.
///
/// A missing directory counts as empty. Files that cannot be read are skipped
/// (and logged) so one bad sibling cannot block duplicate detection.
pub fn find_duplicate(content: &[u8], dir: &Path) -> Result<Option<String>> {
    if !dir.exists() {
        return Ok(None);
    }

    let content_hash = checksum::sha256_bytes(content);

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("list directory {}", dir.display()))?;
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("skipping unreadable directory entry: {}", err);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match checksum::sha256_path(&path) {
            Ok(existing_hash) if existing_hash == content_hash => {
                return Ok(Some(entry.file_name().to_string_lossy().into_owned()));
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!("skipping unhashable file {}: {:#}", path.display(), err);
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_directory_has_no_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_duplicate(b"anything", dir.path()).unwrap(), None);
    }

    #[test]
    fn missing_directory_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not_created_yet");
        assert_eq!(find_duplicate(b"anything", &missing).unwrap(), None);
    }

    #[test]
    fn finds_existing_content_under_any_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("first.png"), b"same bytes").unwrap();
        let found = find_duplicate(b"same bytes", dir.path()).unwrap();
        assert_eq!(found.as_deref(), Some("first.png"));
    }

    #[test]
    fn different_content_is_not_a_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("first.png"), b"one image").unwrap();
        assert_eq!(find_duplicate(b"another image", dir.path()).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_sibling_is_skipped_and_scan_continues() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked.png");
        fs::write(&locked, b"unreadable bytes").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::File::open(&locked).is_ok() {
            // euid 0: permission bits don't apply, nothing to exercise
            return;
        }
        fs::write(dir.path().join("dup.png"), b"same bytes").unwrap();

        // A no-match scan walks every entry, locked file included, and must
        // still complete.
        assert_eq!(find_duplicate(b"no match", dir.path()).unwrap(), None);

        let found = find_duplicate(b"same bytes", dir.path()).unwrap();
        assert_eq!(found.as_deref(), Some("dup.png"));
    }

    #[test]
    fn subdirectories_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("hidden.png"), b"nested bytes").unwrap();
        assert_eq!(find_duplicate(b"nested bytes", dir.path()).unwrap(), None);
    }
}
