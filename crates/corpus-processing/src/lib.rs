//! Chat Export Corpus Library
//!
//! Turns a chat export (e.g. a Telegram `result.json`) into a clean text
//! corpus ready for analysis or model training.
//!
//! # Overview
//!
//! - **Extraction**: walks the message list and flattens text stored either as
//!   a string or as a list of mixed string/object fragments
//! - **Normalization**: strips symbols, collapses whitespace, lowercases, trims
//! - **Statistics**: post count, average character length, average token length
//! - **Loading / Export**: `.json` loader and polars-backed CSV export
//!
//! Order is preserved end to end: the n-th cleaned post comes from the n-th
//! message that carried text.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use corpus_processing::{CsvExporter, JsonLoader, Pipeline};
//!
//! let document = JsonLoader::new("result.json").load()?;
//! let result = Pipeline::builder().build()?.process(&document);
//!
//! CsvExporter::new("output").export(&result.posts)?;
//!
//! match result.stats {
//!     Some(stats) => println!("{} posts, {:.1} chars avg", stats.post_count, stats.avg_char_length),
//!     None => println!("No posts found"),
//! }
//! ```
//!
//! # Using the stages directly
//!
//! ```rust,ignore
//! use corpus_processing::{extract_posts, TextNormalizer, compute_stats};
//!
//! let posts = extract_posts(&document);
//! let cleaned = TextNormalizer.clean_all(posts);
//! let stats = compute_stats(&cleaned);
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod io;
pub mod normalizer;
pub mod pipeline;
pub mod stats;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    ConfigValidationError, EmptyFragmentPolicy, PipelineConfig, PipelineConfigBuilder,
    TokenStatsMode,
};
pub use error::{CorpusError, Result as CorpusResult, ResultExt};
pub use extractor::{
    Extraction, Fragment, PostExtractor, SkipReason, SkippedMessage, TextField, extract_posts,
};
pub use io::{CsvExporter, JsonLoader, posts_to_dataframe, write_report};
pub use normalizer::{TextNormalizer, clean_text, clean_value};
pub use pipeline::{
    ClosureProgressReporter, Pipeline, PipelineBuilder, PipelineStage, ProgressReporter,
    ProgressUpdate,
};
pub use stats::{CorpusStatistics, compute_stats};
pub use types::{CleanedPost, CorpusReport, CorpusStats, PipelineResult, Post, RunSummary};
