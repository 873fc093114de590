use crate::config::{PipelineConfig, TokenStatsMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A post extracted from one message, before normalization.
///
/// `id` and `date` are copied from the message untouched; a missing field is
/// `Value::Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Value,
    pub date: Value,
    pub text: String,
}

impl Post {
    pub fn new(id: Value, date: Value, text: impl Into<String>) -> Self {
        Self {
            id,
            date,
            text: text.into(),
        }
    }
}

/// A post whose text went through the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedPost {
    pub id: Value,
    pub date: Value,
    pub text: String,
}

impl CleanedPost {
    /// View this cleaned post as a [`Post`] again, e.g. to clean it twice.
    pub fn to_post(&self) -> Post {
        Post::new(self.id.clone(), self.date.clone(), self.text.clone())
    }
}

/// Summary metrics of a non-empty corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub post_count: usize,
    pub avg_char_length: f64,
    pub avg_token_length: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Cleaned posts, in message order.
    pub posts: Vec<CleanedPost>,
    /// `None` when no post was extracted.
    pub stats: Option<CorpusStats>,
    pub messages_seen: usize,
    pub messages_skipped: usize,
    pub duration_ms: u64,
}

impl PipelineResult {
    /// Counts and statistics without the posts themselves.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            messages_seen: self.messages_seen,
            messages_skipped: self.messages_skipped,
            post_count: self.posts.len(),
            stats: self.stats.clone(),
            duration_ms: self.duration_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub messages_seen: usize,
    pub messages_skipped: usize,
    pub post_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CorpusStats>,
    pub duration_ms: u64,
}

/// JSON report written next to the exported corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusReport {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub token_stats_mode: TokenStatsMode,
    pub config: PipelineConfig,
    pub summary: RunSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_serialization_keeps_null_fields() {
        let post = Post::new(json!(7), Value::Null, "hello");
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value, json!({"id": 7, "date": null, "text": "hello"}));
    }

    #[test]
    fn test_summary_omits_missing_stats() {
        let result = PipelineResult {
            posts: Vec::new(),
            stats: None,
            messages_seen: 3,
            messages_skipped: 3,
            duration_ms: 0,
        };
        let summary = result.summary();
        assert_eq!(summary.post_count, 0);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("stats"));
    }
}
