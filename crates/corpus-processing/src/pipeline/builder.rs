//! Main corpus pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating extraction, normalization and statistics.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::extractor::{Extraction, PostExtractor, SkipReason};
use crate::normalizer::TextNormalizer;
use crate::pipeline::progress::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate,
};
use crate::stats::CorpusStatistics;
use crate::types::{CleanedPost, PipelineResult, Post};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// The corpus pipeline: document -> posts -> cleaned posts -> statistics.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use corpus_processing::{Pipeline, PipelineConfig};
///
/// let result = Pipeline::builder()
///     .config(PipelineConfig::builder().parallel_normalization(true).build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .process(&document);
///
/// if let Some(stats) = result.stats {
///     println!("{} posts", stats.post_count);
/// }
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    extractor: PostExtractor,
    normalizer: TextNormalizer,
    statistics: CorpusStatistics,
}

static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over a parsed document.
    ///
    /// Never fails: a document without messages produces an empty result with
    /// `stats == None`.
    pub fn process(&self, document: &Value) -> PipelineResult {
        let start_time = Instant::now();

        info!("Starting corpus pipeline...");
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Initializing,
            0.0,
            "Starting corpus pipeline...",
        ));

        // Step 1: Extract posts
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Extracting,
            0.0,
            "Extracting posts...",
        ));
        let extraction = self.extractor.extract_with_report(document);
        self.log_extraction(&extraction);
        self.report_progress(ProgressUpdate::with_items(
            PipelineStage::Extracting,
            extraction.messages_seen,
            extraction.messages_seen,
            format!("Extracted {} posts", extraction.posts.len()),
        ));

        let Extraction {
            posts,
            skipped,
            messages_seen,
        } = extraction;

        // Step 2: Normalize text
        let post_total = posts.len();
        self.report_progress(ProgressUpdate::with_items(
            PipelineStage::Normalizing,
            0,
            post_total,
            "Normalizing post text...",
        ));
        let cleaned = self.normalize(posts);
        self.report_progress(ProgressUpdate::with_items(
            PipelineStage::Normalizing,
            cleaned.len(),
            post_total,
            format!("Normalized {} posts", cleaned.len()),
        ));

        // Step 3: Statistics
        self.report_progress(ProgressUpdate::new(
            PipelineStage::Statistics,
            0.0,
            "Computing corpus statistics...",
        ));
        let stats = self.statistics.compute(&cleaned);
        match &stats {
            Some(stats) => info!(
                "Corpus statistics: {} posts, avg {:.2} chars, avg {:.2} token chars",
                stats.post_count, stats.avg_char_length, stats.avg_token_length
            ),
            None => info!("Corpus is empty; no statistics computed"),
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;
        self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
        info!("Corpus pipeline finished in {} ms", duration_ms);

        PipelineResult {
            posts: cleaned,
            stats,
            messages_seen,
            messages_skipped: skipped.len(),
            duration_ms,
        }
    }

    fn normalize(&self, posts: Vec<Post>) -> Vec<CleanedPost> {
        if self.config.parallel_normalization {
            debug!("Normalizing {} posts in parallel", posts.len());
            self.normalizer.par_clean_all(posts)
        } else {
            self.normalizer.clean_all(posts)
        }
    }

    fn log_extraction(&self, extraction: &Extraction) {
        if extraction.messages_seen == 0 {
            info!(
                "No '{}' list found in document; nothing to extract",
                self.config.messages_key
            );
            return;
        }

        info!(
            "Extracted {} posts from {} messages",
            extraction.posts.len(),
            extraction.messages_seen
        );

        for reason in SkipReason::ALL {
            let count = extraction.skipped_by(reason);
            if count > 0 {
                debug!("Skipped {} messages: {}", count, reason.display_name());
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

/// Builder for creating a [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a closure to receive progress updates.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            extractor: PostExtractor::from_config(&config),
            normalizer: TextNormalizer,
            statistics: CorpusStatistics::new(config.token_stats_mode),
            progress_reporter: self.progress_reporter,
            config,
        })
    }
}
