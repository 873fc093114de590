//! JSON export loader.

use crate::error::{CorpusError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads a chat export from a `.json` file.
#[derive(Debug, Clone)]
pub struct JsonLoader {
    path: PathBuf,
}

impl JsonLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that the path exists, is a regular file and has a `.json` extension.
    pub fn validate(&self) -> Result<()> {
        if !self.path.exists() {
            return Err(CorpusError::FileNotFound(self.path.clone()));
        }
        if !self.path.is_file() {
            return Err(CorpusError::NotAFile(self.path.clone()));
        }
        let is_json = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            return Err(CorpusError::InvalidExtension(self.path.clone()));
        }
        Ok(())
    }

    /// Validate the path, then read and decode the document.
    pub fn load(&self) -> Result<Value> {
        self.validate()?;

        debug!("Reading {}", self.path.display());
        let raw = fs::read_to_string(&self.path)?;
        let document = serde_json::from_str(&raw).map_err(|e| CorpusError::DecodeFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        info!("Data loaded from {}", self.path.display());
        Ok(document)
    }
}
