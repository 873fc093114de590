//! Corpus statistics over cleaned posts.

use crate::config::TokenStatsMode;
use crate::types::{CleanedPost, CorpusStats};
use crate::utils::char_len;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD_NON_SPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\p{L}\p{N}_\s]").expect("Invalid regex: non-word characters")
});

/// Computes summary metrics for a corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusStatistics {
    mode: TokenStatsMode,
}

impl CorpusStatistics {
    pub fn new(mode: TokenStatsMode) -> Self {
        Self { mode }
    }

    /// Compute statistics, or `None` for an empty corpus.
    ///
    /// `avg_char_length` is the mean character count of the post texts.
    /// `avg_token_length` divides the punctuation-free character count by the
    /// post count: summed over every post in [`TokenStatsMode::Aggregate`], or
    /// taken from the first post only in [`TokenStatsMode::FirstPostOnly`].
    pub fn compute(&self, posts: &[CleanedPost]) -> Option<CorpusStats> {
        let first = posts.first()?;
        let post_count = posts.len();
        let count = post_count as f64;

        let total_chars: usize = posts.iter().map(|p| char_len(&p.text)).sum();

        let token_chars: usize = match self.mode {
            TokenStatsMode::Aggregate => posts.iter().map(|p| token_char_len(&p.text)).sum(),
            TokenStatsMode::FirstPostOnly => token_char_len(&first.text),
        };

        Some(CorpusStats {
            post_count,
            avg_char_length: total_chars as f64 / count,
            avg_token_length: token_chars as f64 / count,
        })
    }
}

/// Character count of `text` once everything but letters, numbers, `_` and
/// whitespace has been removed.
pub fn token_char_len(text: &str) -> usize {
    char_len(&NON_WORD_NON_SPACE.replace_all(text, ""))
}

/// Compute statistics with the default [`TokenStatsMode::Aggregate`].
pub fn compute_stats(posts: &[CleanedPost]) -> Option<CorpusStats> {
    CorpusStatistics::default().compute(posts)
}
