//! Escape characters that would break out of a SQL string literal.
//!
//! This is defense in depth against literal breakout and LIKE-wildcard
//! injection for values that end up inside interpolated literals. It is
//! not a substitute for parameterized execution; it exists because the
//! emitted statements are plain strings by contract.

/// Search values longer than this are rejected outright.
pub const DEFAULT_MAX_SEARCH_LENGTH: usize = 256;

/// Sanitize a search value with the default length bound.
pub fn sanitize(value: &str) -> Option<String> {
    sanitize_with_limit(value, DEFAULT_MAX_SEARCH_LENGTH)
}

/// Escape every character with meaning inside a SQL string literal or a
/// LIKE pattern. Returns `None` when the value exceeds `max_length` bytes,
/// which callers must treat as "no value". Empty input passes through.
pub fn sanitize_with_limit(value: &str, max_length: usize) -> Option<String> {
    if value.is_empty() {
        return Some(String::new());
    }
    if value.len() > max_length {
        return None;
    }
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\0' => escaped.push_str("\\0"),
            '\u{8}' => escaped.push_str("\\b"),
            '\t' => escaped.push_str("\\t"),
            '\u{1a}' => escaped.push_str("\\z"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '"' => escaped.push_str("\\\""),
            '\'' => escaped.push_str("\\'"),
            '\\' => escaped.push_str("\\\\"),
            '%' => escaped.push_str("\\%"),
            other => escaped.push(other),
        }
    }
    Some(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn plain_strings_pass_through_unchanged() {
        assert_eq!(sanitize("hello world 123").as_deref(), Some("hello world 123"));
        assert_eq!(sanitize("").as_deref(), Some(""));
    }

    #[test]
    fn restricted_characters_are_escaped() {
        assert_eq!(sanitize("it's").as_deref(), Some("it\\'s"));
        assert_eq!(sanitize("a\"b").as_deref(), Some("a\\\"b"));
        assert_eq!(sanitize("100%").as_deref(), Some("100\\%"));
        assert_eq!(sanitize("a\\b").as_deref(), Some("a\\\\b"));
        assert_eq!(
            sanitize("\0\u{8}\t\u{1a}\n\r").as_deref(),
            Some("\\0\\b\\t\\z\\n\\r")
        );
    }

    #[test]
    fn oversized_values_are_rejected() {
        let long = "x".repeat(DEFAULT_MAX_SEARCH_LENGTH + 1);
        assert_eq!(sanitize(&long), None);
        assert_eq!(sanitize_with_limit("abcd", 3), None);
        assert_eq!(sanitize_with_limit("abc", 3).as_deref(), Some("abc"));
    }

    #[test]
    fn double_application_re_escapes_backslashes() {
        let once = sanitize("it's").unwrap();
        let twice = sanitize(&once).unwrap();
        assert_eq!(twice, "it\\\\\\'s");
    }
}
