//! Custom error types for the corpus pipeline.
//!
//! The pipeline stages themselves never fail: extraction is permissive,
//! normalization coerces everything, and statistics on an empty corpus are
//! `None`. Errors only come from the collaborators around the core (loading
//! the export, writing the cleaned corpus) and from configuration validation.
//!
//! Errors are serializable so they can be handed to a front end as
//! `{ "code": ..., "message": ... }`.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the corpus pipeline.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Input path does not exist.
    #[error("File '{}' does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// Input path exists but is a directory (or other non-file).
    #[error("'{}' is a directory, not a file", .0.display())]
    NotAFile(PathBuf),

    /// Input path does not carry a `.json` extension.
    #[error("Unsupported file extension for '{}' (expected .json)", .0.display())]
    InvalidExtension(PathBuf),

    /// Input file could not be decoded as JSON.
    #[error("Failed to decode '{}': {reason}", .path.display())]
    DecodeFailed { path: PathBuf, reason: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing the cleaned corpus failed.
    #[error("Failed to export corpus: {0}")]
    ExportFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CorpusError>,
    },
}

impl CorpusError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CorpusError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::NotAFile(_) => "NOT_A_FILE",
            Self::InvalidExtension(_) => "INVALID_EXTENSION",
            Self::DecodeFailed { .. } => "DECODE_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ExportFailed(_) => "EXPORT_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error came from validating the input path, before any
    /// bytes were read.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::FileNotFound(_) | Self::NotAFile(_) | Self::InvalidExtension(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Serialize implementation for front-end display.
///
/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CorpusError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CorpusError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CorpusError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CorpusError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            CorpusError::FileNotFound(PathBuf::from("a.json")).error_code(),
            "FILE_NOT_FOUND"
        );
        assert_eq!(
            CorpusError::InvalidConfig("bad".to_string()).error_code(),
            "INVALID_CONFIG"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(CorpusError::NotAFile(PathBuf::from("dir")).is_input_error());
        assert!(CorpusError::InvalidExtension(PathBuf::from("a.txt")).is_input_error());
        assert!(!CorpusError::ExportFailed("disk full".to_string()).is_input_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = CorpusError::FileNotFound(PathBuf::from("result.json"));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("FILE_NOT_FOUND"));
        assert!(json.contains("result.json"));
    }

    #[test]
    fn test_with_context() {
        let error = CorpusError::InvalidExtension(PathBuf::from("data.csv"))
            .with_context("While loading export");
        assert!(error.to_string().contains("While loading export"));
        assert_eq!(error.error_code(), "INVALID_EXTENSION");
        assert!(error.is_input_error());
    }

    #[test]
    fn test_io_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let error = result.context("Creating output directory").unwrap_err();
        assert_eq!(error.error_code(), "IO_ERROR");
        assert!(error.to_string().starts_with("Creating output directory"));
    }
}
