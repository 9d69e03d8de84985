//! Mapping between image MIME types and file extensions.

/// Extensions accepted as evidence that a URL path segment names an image.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"];

/// True if `name` ends in a recognized image extension (case-insensitive).
pub fn has_image_extension(name: &str) -> bool {
    let ext = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return false,
    };
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Extension (with leading dot) for a declared image content type.
///
/// Parameters such as `;charset=...` are ignored; unrecognized or missing
/// types default to `.jpg`.
pub fn extension_for_mime(content_type: Option<&str>) -> &'static str {
    let mime = match content_type {
        Some(ct) => ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase(),
        None => return ".jpg",
    };
    match mime.as_str() {
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/svg+xml" => ".svg",
        "image/bmp" => ".bmp",
        _ => ".jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_image_extensions() {
        assert!(has_image_extension("photo.jpg"));
        assert!(has_image_extension("PHOTO.JPEG"));
        assert!(has_image_extension("anim.gif"));
        assert!(!has_image_extension("page.html"));
        assert!(!has_image_extension("noext"));
        assert!(!has_image_extension(".png"));
    }

    #[test]
    fn maps_known_mime_types() {
        assert_eq!(extension_for_mime(Some("image/png")), ".png");
        assert_eq!(extension_for_mime(Some("image/svg+xml")), ".svg");
        assert_eq!(extension_for_mime(Some("IMAGE/WebP")), ".webp");
        assert_eq!(extension_for_mime(Some("image/jpeg; charset=binary")), ".jpg");
    }

    #[test]
    fn unknown_or_missing_defaults_to_jpg() {
        assert_eq!(extension_for_mime(Some("text/html")), ".jpg");
        assert_eq!(extension_for_mime(None), ".jpg");
    }
}
