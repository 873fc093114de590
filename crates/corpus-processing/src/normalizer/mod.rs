//! Text normalization for extracted posts.
//!
//! Every post goes through the same ordered steps:
//!
//! 1. coerce to text
//! 2. replace anything that is not a letter, a number, `_`, whitespace or one
//!    of `. , ! ? -` with a space
//! 3. collapse whitespace runs into a single space
//! 4. lowercase
//! 5. trim
//!
//! Step order matters: symbols become spaces before the collapse, so
//! `"a # b"` ends up as `"a b"` rather than `"a   b"`.

use crate::types::{CleanedPost, Post};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;

// Word characters are letters, numbers and `_`. Regex `\w` would also keep
// combining marks and joiners, which leaves U+FE0F and U+200D behind from emoji.
static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N}_\s.,!?-]").expect("Invalid regex: disallowed characters")
});

static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace runs"));

/// Stateless text normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Build a cleaned post from a post. `id` and `date` are carried over.
    pub fn clean(&self, post: &Post) -> CleanedPost {
        CleanedPost {
            id: post.id.clone(),
            date: post.date.clone(),
            text: clean_text(&post.text),
        }
    }

    /// Consuming variant of [`clean`](Self::clean) that avoids cloning ids and dates.
    pub fn clean_owned(&self, post: Post) -> CleanedPost {
        CleanedPost {
            text: clean_text(&post.text),
            id: post.id,
            date: post.date,
        }
    }

    /// Clean posts in order on the current thread.
    pub fn clean_all(&self, posts: Vec<Post>) -> Vec<CleanedPost> {
        posts.into_iter().map(|post| self.clean_owned(post)).collect()
    }

    /// Clean posts on the rayon thread pool.
    ///
    /// Indexed parallel iterators collect by position, so the output order is
    /// the input order regardless of which worker finishes first.
    pub fn par_clean_all(&self, posts: Vec<Post>) -> Vec<CleanedPost> {
        posts
            .into_par_iter()
            .map(|post| self.clean_owned(post))
            .collect()
    }
}

/// Normalize a single piece of text.
pub fn clean_text(text: &str) -> String {
    let text = DISALLOWED_CHARS.replace_all(text, " ");
    let text = WHITESPACE_RUNS.replace_all(&text, " ");
    text.to_lowercase().trim().to_string()
}

/// Normalize an arbitrary JSON value, coercing non-strings to text first.
///
/// Strings are used without their JSON quotes; `null` becomes empty text.
pub fn clean_value(value: &Value) -> String {
    match value {
        Value::String(s) => clean_text(s),
        Value::Null => String::new(),
        other => clean_text(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_clean_strips_symbols_and_whitespace() {
        assert_eq!(clean_text("  Hello, World! #tag @user  "), "hello, world! tag user");
    }

    #[test]
    fn test_clean_keeps_allowed_punctuation() {
        assert_eq!(clean_text("Wait... what?! Well-known, ok."), "wait... what?! well-known, ok.");
    }

    #[test]
    fn test_clean_collapses_newlines_and_tabs() {
        assert_eq!(clean_text("line one\n\n\tline\r\ntwo"), "line one line two");
    }

    #[test]
    fn test_clean_symbols_between_spaces_collapse() {
        assert_eq!(clean_text("a # b"), "a b");
        assert_eq!(clean_text("price: $100 (approx)"), "price 100 approx");
    }

    #[test]
    fn test_clean_keeps_unicode_words() {
        assert_eq!(clean_text("Привет, МИР! 🚀 Ёлка"), "привет, мир! ёлка");
    }

    #[test]
    fn test_clean_drops_emoji_variation_selector() {
        assert_eq!(clean_text("I \u{2764}\u{fe0f} you"), "i you");
    }

    #[test]
    fn test_clean_drops_zero_width_joiner_sequences() {
        let family = "\u{1f468}\u{200d}\u{1f469}\u{200d}\u{1f467}";
        assert_eq!(clean_text(&format!("{family} family")), "family");
    }

    #[test]
    fn test_clean_drops_combining_marks() {
        // "e" followed by a combining acute accent
        assert_eq!(clean_text("cafe\u{301}"), "cafe");
    }

    #[test]
    fn test_clean_keeps_numeric_symbols() {
        assert_eq!(clean_text("x½ ²"), "x½ ²");
    }

    #[test]
    fn test_clean_keeps_underscores_and_digits() {
        assert_eq!(clean_text("snake_case 42"), "snake_case 42");
    }

    #[test]
    fn test_clean_empty_and_symbol_only() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("#@$%^&*"), "");
    }

    #[test]
    fn test_clean_post_preserves_identity() {
        let post = Post::new(json!(1), json!("2025-10-10"), "Post 1");
        let cleaned = TextNormalizer.clean(&post);

        assert_eq!(cleaned.id, json!(1));
        assert_eq!(cleaned.date, json!("2025-10-10"));
        assert_eq!(cleaned.text, "post 1");
        assert_eq!(post.text, "Post 1");
    }

    #[test]
    fn test_clean_value_coerces_non_strings() {
        assert_eq!(clean_value(&json!(12345)), "12345");
        assert_eq!(clean_value(&json!(true)), "true");
        assert_eq!(clean_value(&json!("  MiXeD  ")), "mixed");
        assert_eq!(clean_value(&Value::Null), "");
        assert_eq!(clean_value(&json!(["A", "b"])), "a , b");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let posts: Vec<Post> = (0..500)
            .map(|i| Post::new(json!(i), Value::Null, format!("Post #{i}\t@{}", i * 7)))
            .collect();

        let sequential = TextNormalizer.clean_all(posts.clone());
        let parallel = TextNormalizer.par_clean_all(posts);

        assert_eq!(sequential, parallel);
        assert_eq!(parallel[3].text, "post 3 21");
    }

    proptest! {
        #[test]
        fn prop_clean_is_idempotent(text in "[a-zA-Zа-яА-ЯёЁ0-9 \t\n.,!?#@*()_-]{0,64}") {
            let once = clean_text(&text);
            prop_assert_eq!(clean_text(&once), once);
        }

        #[test]
        fn prop_clean_output_is_trimmed_and_collapsed(text in "\\PC{0,64}") {
            let cleaned = clean_text(&text);
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
            prop_assert!(!cleaned.contains("  "));
            prop_assert!(!cleaned.contains('\n'));
            prop_assert!(!cleaned.contains('\t'));
        }
    }
}
