//! Parse HTTP response header lines into a ResponseHead.

use super::ResponseHead;

/// Parse collected header lines into the declared content type and length.
///
/// Redirect chains deliver several responses' headers back to back; a status
/// line resets the fields so only the final response counts.
pub(crate) fn parse_head(lines: &[String]) -> ResponseHead {
    let mut content_type = None;
    let mut content_length = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.to_ascii_uppercase().starts_with("HTTP/") {
            content_type = None;
            content_length = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-type") {
                content_type = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    content_length = Some(n);
                }
            }
        }
    }

    ResponseHead {
        content_type,
        content_length,
    }
}
