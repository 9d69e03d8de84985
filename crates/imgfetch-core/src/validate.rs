//! Response header validation, applied before any body is persisted.

/// Verdict on a response's declared headers.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub valid: bool,
    pub reason: String,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            reason: String::new(),
        }
    }

    fn fail(reason: String) -> Self {
        Self {
            valid: false,
            reason,
        }
    }
}

/// Checks the declared `Content-Type` and `Content-Length` of a response.
///
/// Rules in order, first failure wins:
/// 1. content type must be present and start with `image/`;
/// 2. a declared length, when present, must not exceed `max_bytes`.
///
/// An absent length is not a failure; the byte cap is enforced separately
/// while the body is read.
pub fn validate_headers(
    content_type: Option<&str>,
    content_length: Option<u64>,
    max_bytes: u64,
) -> ValidationResult {
    let content_type = content_type.unwrap_or("").trim().to_ascii_lowercase();
    if !content_type.starts_with("image/") {
        return ValidationResult::fail(format!(
            "Content-Type '{}' is not an image",
            content_type
        ));
    }

    if let Some(length) = content_length {
        if length > max_bytes {
            let size_mb = length as f64 / (1024.0 * 1024.0);
            let limit_mb = max_bytes / (1024 * 1024);
            return ValidationResult::fail(format!(
                "File size ({:.1}MB) exceeds safety limit of {}MB",
                size_mb, limit_mb
            ));
        }
    }

    ValidationResult::ok()
}
