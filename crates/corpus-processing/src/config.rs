//! Configuration types for the corpus pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};

/// What to do with a fragmented text field whose fragments resolve to nothing.
///
/// A plain string field that is empty never produces a post. A fragment
/// sequence that concatenates to `""` (for example a list holding only
/// unsupported objects) historically still produced a post with empty text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmptyFragmentPolicy {
    /// Emit a post with empty text (historical exports match this)
    #[default]
    Keep,
    /// Skip the message, the same way an empty string is skipped
    Drop,
}

/// How `avg_token_length` is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TokenStatsMode {
    /// Sum the punctuation-free length of every post and divide by the post count
    #[default]
    Aggregate,
    /// Use only the first post's punctuation-free length divided by the post count.
    /// Reproduces figures produced by older tooling.
    FirstPostOnly,
}

/// Configuration for the corpus pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use corpus_processing::config::{PipelineConfig, TokenStatsMode};
///
/// let config = PipelineConfig::builder()
///     .messages_key("messages")
///     .token_stats_mode(TokenStatsMode::Aggregate)
///     .parallel_normalization(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Document key holding the ordered message list.
    /// Default: "messages"
    pub messages_key: String,

    /// Key holding text, both on messages and on object fragments.
    /// Default: "text"
    pub text_key: String,

    /// Handling of fragment sequences that resolve to empty text.
    /// Default: Keep
    pub empty_fragment_policy: EmptyFragmentPolicy,

    /// Computation of the average token length statistic.
    /// Default: Aggregate
    pub token_stats_mode: TokenStatsMode,

    /// Whether to normalize posts on the rayon thread pool.
    /// Output order is identical either way.
    /// Default: false
    pub parallel_normalization: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            messages_key: "messages".to_string(),
            text_key: "text".to_string(),
            empty_fragment_policy: EmptyFragmentPolicy::default(),
            token_stats_mode: TokenStatsMode::default(),
            parallel_normalization: false,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.messages_key.trim().is_empty() {
            return Err(ConfigValidationError::EmptyKey {
                field: "messages_key".to_string(),
            });
        }

        if self.text_key.trim().is_empty() {
            return Err(ConfigValidationError::EmptyKey {
                field: "text_key".to_string(),
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid key for '{field}': must not be empty")]
    EmptyKey { field: String },
}

impl From<ConfigValidationError> for crate::error::CorpusError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::CorpusError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    messages_key: Option<String>,
    text_key: Option<String>,
    empty_fragment_policy: Option<EmptyFragmentPolicy>,
    token_stats_mode: Option<TokenStatsMode>,
    parallel_normalization: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Set the document key that holds the message list.
    pub fn messages_key(mut self, key: impl Into<String>) -> Self {
        self.messages_key = Some(key.into());
        self
    }

    /// Set the key that holds text on messages and object fragments.
    pub fn text_key(mut self, key: impl Into<String>) -> Self {
        self.text_key = Some(key.into());
        self
    }

    /// Set the policy for fragment sequences that resolve to empty text.
    pub fn empty_fragment_policy(mut self, policy: EmptyFragmentPolicy) -> Self {
        self.empty_fragment_policy = Some(policy);
        self
    }

    /// Set how the average token length is computed.
    pub fn token_stats_mode(mut self, mode: TokenStatsMode) -> Self {
        self.token_stats_mode = Some(mode);
        self
    }

    /// Enable or disable parallel normalization.
    pub fn parallel_normalization(mut self, parallel: bool) -> Self {
        self.parallel_normalization = Some(parallel);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let config = PipelineConfig {
            messages_key: self
                .messages_key
                .unwrap_or_else(|| "messages".to_string()),
            text_key: self.text_key.unwrap_or_else(|| "text".to_string()),
            empty_fragment_policy: self.empty_fragment_policy.unwrap_or_default(),
            token_stats_mode: self.token_stats_mode.unwrap_or_default(),
            parallel_normalization: self.parallel_normalization.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}
