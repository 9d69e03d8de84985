//! URL modeling and filename derivation.
//!
//! Derives a safe local filename from the URL path when it carries a usable
//! image extension, otherwise synthesizes one from the declared content type.

mod mime;
mod path;
mod sanitize;

pub use mime::{extension_for_mime, has_image_extension};
pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

use crate::checksum;

/// Derives the filename an image fetched from `url` will be saved under.
///
/// The last URL path segment is used verbatim (after sanitization) when it
/// ends in a recognized image extension. Anything else, including malformed
/// URLs and paths ending in `/`, falls back to a synthesized
/// `image_<suffix>.<ext>` name whose extension comes from `content_type`.
/// The suffix is a prefix of the URL's own digest, so resolution is
/// deterministic per URL. Never panics.
///
/// # Examples
///
/// - `resolve_filename("https://example.com/a/photo.jpg", None)` → `"photo.jpg"`
/// - `resolve_filename("https://example.com/gallery/", Some("image/png"))` → `"image_<hex>.png"`
pub fn resolve_filename(url: &str, content_type: Option<&str>) -> String {
    if let Some(segment) = filename_from_url_path(url) {
        let candidate = sanitize_filename(&segment);
        if !candidate.is_empty() && has_image_extension(&candidate) {
            return candidate;
        }
    }

    let suffix = &checksum::sha256_bytes(url.as_bytes())[..8];
    format!("image_{}{}", suffix, extension_for_mime(content_type))
}
