//! Small shared helpers for logging previews and text normalization.

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and
/// byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// Text collected from an HTML subtree arrives as fragments separated by
/// arbitrary markup whitespace; this normalizes it into the single-spaced
/// form used for anchor text and paragraph bodies.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "ααααα";
        let result = truncate_for_log(s, 3);
        assert!(result.starts_with('α'));
    }

    #[test]
    fn test_normalize_ws() {
        assert_eq!(normalize_ws("  hello \n\t world  "), "hello world");
        assert_eq!(normalize_ws("one two"), "one two");
        assert_eq!(normalize_ws("   "), "");
    }
}
