//! Loading exports and writing results.
//!
//! These collaborators sit around the pipeline: the loader hands it a parsed
//! document and the exporter persists what it produces.

mod exporter;
mod loader;

pub use exporter::{CsvExporter, DEFAULT_OUTPUT_NAME, posts_to_dataframe, write_report};
pub use loader::JsonLoader;
