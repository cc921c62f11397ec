//! Shared utility functions.

/// Truncate a string to at most `max_chars` characters.
///
/// Returns a sub-slice of the original string, so multi-byte characters are
/// never split. Strings that already fit are returned unchanged.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Join the first `n` items of a list, or return `fallback` when the list is empty.
pub fn join_first(items: &[String], n: usize, fallback: &str) -> String {
    if items.is_empty() {
        return fallback.to_string();
    }
    items.iter().take(n).cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_chars("hi", 10), "hi");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let s = "µg/dL µmol";
        assert_eq!(truncate_chars(s, 2), "µg");
        assert_eq!(truncate_chars("あのね", 2), "あの");
    }

    #[test]
    fn join_first_uses_fallback_for_empty() {
        assert_eq!(join_first(&[], 2, "none"), "none");
        let items = vec!["ECG".to_string(), "Troponin".to_string(), "CXR".to_string()];
        assert_eq!(join_first(&items, 2, "none"), "ECG, Troponin");
    }
}
