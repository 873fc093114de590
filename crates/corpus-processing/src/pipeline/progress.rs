//! Progress reporting for the corpus pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use corpus_processing::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {}", update.stage, update.message);
//!     })
//!     .build()?
//!     .process(&document);
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the corpus pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Pipeline is starting
    Initializing,
    /// Walking the message list and resolving text fields
    Extracting,
    /// Cleaning post texts
    Normalizing,
    /// Computing corpus statistics
    Statistics,
    /// Pipeline completed
    Complete,
}

impl PipelineStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::Extracting => "Extracting Posts",
            Self::Normalizing => "Normalizing Text",
            Self::Statistics => "Computing Statistics",
            Self::Complete => "Complete",
        }
    }

    /// Share of the overall run taken by this stage (0.0 - 1.0).
    pub fn weight(&self) -> f32 {
        match self {
            Self::Initializing => 0.05,
            Self::Extracting => 0.40,
            Self::Normalizing => 0.45,
            Self::Statistics => 0.10,
            Self::Complete => 0.0,
        }
    }

    /// Cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Initializing => 0.0,
            Self::Extracting => 0.05,
            Self::Normalizing => 0.45,
            Self::Statistics => 0.90,
            Self::Complete => 1.0,
        }
    }
}

/// A progress update emitted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: PipelineStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,

    /// Number of items handled in current stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_processed: Option<usize>,

    /// Total items in current stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_total: Option<usize>,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage.
    pub fn new(stage: PipelineStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
            items_processed: None,
            items_total: None,
        }
    }

    /// Creates a progress update with item counts.
    pub fn with_items(
        stage: PipelineStage,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        let stage_progress = if total > 0 {
            current as f32 / total as f32
        } else {
            1.0
        };
        Self {
            items_processed: Some(current),
            items_total: Some(total),
            ..Self::new(stage, stage_progress, message)
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(PipelineStage::Complete, 1.0, message)
    }
}

/// Receives progress updates during a pipeline run.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_stage_weights_cover_run() {
        let stages = [
            PipelineStage::Initializing,
            PipelineStage::Extracting,
            PipelineStage::Normalizing,
            PipelineStage::Statistics,
        ];
        let total: f32 = stages.iter().map(|s| s.weight()).sum();
        assert!((total - 1.0).abs() < 1e-6);

        for pair in stages.windows(2) {
            let end = pair[0].base_progress() + pair[0].weight();
            assert!((end - pair[1].base_progress()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_progress_update_new() {
        let update = ProgressUpdate::new(PipelineStage::Normalizing, 0.5, "Halfway");
        assert!((update.progress - 0.675).abs() < 1e-6);
        assert_eq!(update.stage_progress, 0.5);
        assert_eq!(update.message, "Halfway");
    }

    #[test]
    fn test_progress_update_with_items() {
        let update = ProgressUpdate::with_items(PipelineStage::Extracting, 3, 4, "Extracted");
        assert_eq!(update.items_processed, Some(3));
        assert_eq!(update.items_total, Some(4));
        assert!((update.stage_progress - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_progress_update_with_zero_items_is_done() {
        let update = ProgressUpdate::with_items(PipelineStage::Extracting, 0, 0, "Nothing to do");
        assert_eq!(update.stage_progress, 1.0);
    }

    #[test]
    fn test_progress_update_clamped() {
        let update = ProgressUpdate::new(PipelineStage::Statistics, 5.0, "Overshoot");
        assert_eq!(update.progress, 1.0);
        assert_eq!(update.stage_progress, 1.0);
    }

    #[test]
    fn test_closure_reporter() {
        let received = Mutex::new(Vec::new());
        let reporter = ClosureProgressReporter::new(|update: ProgressUpdate| {
            received.lock().unwrap().push(update.stage);
        });

        reporter.report(ProgressUpdate::new(PipelineStage::Initializing, 0.0, "start"));
        reporter.report(ProgressUpdate::complete("done"));

        assert_eq!(
            *received.lock().unwrap(),
            vec![PipelineStage::Initializing, PipelineStage::Complete]
        );
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&PipelineStage::Normalizing).unwrap();
        assert_eq!(json, "\"normalizing\"");
    }
}
