//! String utilities for the domain layer.

/// Keep at most `max_chars` characters of `s`.
///
/// Counts characters rather than bytes, so multi-byte text is never split.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}

/// Return the trimmed text, or `placeholder` if it is absent or blank.
pub fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_ascii() {
        assert_eq!(excerpt("hello", 10), "hello");
        assert_eq!(excerpt("hello world", 5), "hello");
    }

    #[test]
    fn test_excerpt_multibyte() {
        assert_eq!(excerpt("日本語テスト", 3), "日本語");
        assert_eq!(excerpt("👋🌍🎉", 2), "👋🌍");
    }

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder(Some("text"), "Not provided"), "text");
        assert_eq!(or_placeholder(Some("   "), "Not provided"), "Not provided");
        assert_eq!(or_placeholder(None, "Not provided"), "Not provided");
    }
}
