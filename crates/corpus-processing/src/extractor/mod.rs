//! Post extraction module.
//!
//! Walks the message list of a parsed export and turns every message that
//! carries text into a [`Post`]. Extraction is permissive: a document without
//! a message list yields nothing, and malformed messages are skipped rather
//! than reported as errors. Skips are recorded in [`Extraction`] so the caller
//! can decide whether to log them.

pub mod fragments;

pub use fragments::{Fragment, TextField, resolve};

use crate::config::{EmptyFragmentPolicy, PipelineConfig};
use crate::types::Post;
use serde::Serialize;
use serde_json::Value;

/// Why a message produced no post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The list entry is not an object
    NotAnObject,
    /// No text field, or one that is neither a string nor a list
    MissingText,
    /// The text field is an empty string
    EmptyText,
    /// The fragment list resolved to empty text and the policy drops it
    EmptyFragments,
}

impl SkipReason {
    pub const ALL: [SkipReason; 4] = [
        SkipReason::NotAnObject,
        SkipReason::MissingText,
        SkipReason::EmptyText,
        SkipReason::EmptyFragments,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NotAnObject => "not an object",
            Self::MissingText => "missing text",
            Self::EmptyText => "empty text",
            Self::EmptyFragments => "empty fragments",
        }
    }
}

/// A message that was skipped during extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedMessage {
    /// Position in the message list.
    pub index: usize,
    /// The message id, or null when unavailable.
    pub id: Value,
    pub reason: SkipReason,
}

/// Output of an extraction run.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Posts in message order.
    pub posts: Vec<Post>,
    pub skipped: Vec<SkippedMessage>,
    /// Number of entries found in the message list.
    pub messages_seen: usize,
}

impl Extraction {
    /// Number of messages skipped for the given reason.
    pub fn skipped_by(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}

/// Extracts posts from a parsed chat export.
#[derive(Debug, Clone)]
pub struct PostExtractor {
    messages_key: String,
    text_key: String,
    empty_fragment_policy: EmptyFragmentPolicy,
}

impl Default for PostExtractor {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

impl PostExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            messages_key: config.messages_key.clone(),
            text_key: config.text_key.clone(),
            empty_fragment_policy: config.empty_fragment_policy,
        }
    }

    /// Extract posts in message order.
    pub fn extract(&self, document: &Value) -> Vec<Post> {
        self.extract_with_report(document).posts
    }

    /// Extract posts and record which messages were skipped and why.
    pub fn extract_with_report(&self, document: &Value) -> Extraction {
        let Some(messages) = self.messages(document) else {
            return Extraction::default();
        };

        let mut extraction = Extraction {
            posts: Vec::with_capacity(messages.len()),
            skipped: Vec::new(),
            messages_seen: messages.len(),
        };

        for (index, message) in messages.iter().enumerate() {
            match self.extract_message(message) {
                Ok(post) => extraction.posts.push(post),
                Err(reason) => extraction.skipped.push(SkippedMessage {
                    index,
                    id: message.get("id").cloned().unwrap_or(Value::Null),
                    reason,
                }),
            }
        }

        extraction
    }

    /// The message list, if the document is an object holding one.
    fn messages<'a>(&self, document: &'a Value) -> Option<&'a Vec<Value>> {
        document
            .as_object()?
            .get(&self.messages_key)?
            .as_array()
    }

    fn extract_message(&self, message: &Value) -> Result<Post, SkipReason> {
        let fields = message.as_object().ok_or(SkipReason::NotAnObject)?;

        let field = TextField::from_value(fields.get(&self.text_key), &self.text_key);
        let text = resolve(&field).ok_or(SkipReason::MissingText)?;

        if text.is_empty() {
            if !field.is_fragmented() {
                return Err(SkipReason::EmptyText);
            }
            if self.empty_fragment_policy == EmptyFragmentPolicy::Drop {
                return Err(SkipReason::EmptyFragments);
            }
        }

        Ok(Post::new(
            fields.get("id").cloned().unwrap_or(Value::Null),
            fields.get("date").cloned().unwrap_or(Value::Null),
            text,
        ))
    }
}

/// Extract posts with the default configuration.
pub fn extract_posts(document: &Value) -> Vec<Post> {
    PostExtractor::default().extract(document)
}
