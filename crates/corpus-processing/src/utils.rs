//! Shared utilities for the corpus pipeline.

use serde_json::Value;

/// Length of a string in characters (Unicode scalar values), not bytes.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to at most `max_chars` characters, appending "..." when cut.
///
/// Works on character boundaries, so multi-byte text (e.g. Cyrillic) is safe.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}

/// Render a JSON scalar as plain text for tabular output.
///
/// Strings are returned without quotes, `null` becomes `None`, and arrays or
/// objects fall back to their compact JSON form.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("abc"), 3);
        assert_eq!(char_len("привет"), 6);
        assert_eq!(char_len(""), 0);
    }

    #[test]
    fn test_truncate_str_short_input() {
        assert_eq!(truncate_str("short", 100), "short");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("привет мир", 6), "привет...");
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(scalar_to_string(&json!(42)), Some("42".to_string()));
        assert_eq!(scalar_to_string(&json!("2024-01-01")), Some("2024-01-01".to_string()));
        assert_eq!(scalar_to_string(&Value::Null), None);
        assert_eq!(scalar_to_string(&json!(true)), Some("true".to_string()));
        assert_eq!(scalar_to_string(&json!([1, 2])), Some("[1,2]".to_string()));
    }
}
