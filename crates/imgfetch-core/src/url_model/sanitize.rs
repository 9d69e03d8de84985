//! Filesystem-safe filename sanitization.

/// Sanitizes a candidate filename before it touches the destination directory.
///
/// - Replaces path separators, NUL, control characters, and whitespace with `_`
/// - Neutralizes `..` traversal sequences
/// - Trims leading/trailing dots, spaces, and underscores
/// - Collapses consecutive underscores
/// - Limits length to 255 bytes (Linux NAME_MAX)
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let safe = match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() || c.is_whitespace() => '_',
            c => c,
        };
        if safe == '_' && out.ends_with('_') {
            continue;
        }
        out.push(safe);
    }

    let out = out.replace("..", "_");
    let trimmed = out.trim_matches(|c| c == '.' || c == '_' || c == ' ');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
