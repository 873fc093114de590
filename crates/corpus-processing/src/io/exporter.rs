//! CSV export of cleaned posts and the JSON run report.

use crate::error::{CorpusError, Result, ResultExt};
use crate::types::{CleanedPost, CorpusReport};
use crate::utils::scalar_to_string;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default file name (without extension) for the exported corpus.
pub const DEFAULT_OUTPUT_NAME: &str = "cleaned_posts";

/// Build a `DataFrame` with `id`, `date` and `text` columns, one row per post.
///
/// `id` and `date` are rendered as text so mixed types in an export do not
/// break the column; a missing value stays null.
pub fn posts_to_dataframe(posts: &[CleanedPost]) -> Result<DataFrame> {
    let ids: Vec<Option<String>> = posts.iter().map(|p| scalar_to_string(&p.id)).collect();
    let dates: Vec<Option<String>> = posts.iter().map(|p| scalar_to_string(&p.date)).collect();
    let texts: Vec<&str> = posts.iter().map(|p| p.text.as_str()).collect();

    let df = DataFrame::new(vec![
        Series::new("id".into(), ids).into(),
        Series::new("date".into(), dates).into(),
        Series::new("text".into(), texts).into(),
    ])?;

    Ok(df)
}

/// Writes cleaned posts to a CSV file.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
    file_name: String,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }

    /// Set the output file name (without extension).
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Path the CSV will be written to.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.file_name))
    }

    /// Write the posts, creating the output directory if needed.
    pub fn export(&self, posts: &[CleanedPost]) -> Result<PathBuf> {
        if self.file_name.trim().is_empty() {
            return Err(CorpusError::ExportFailed(
                "output file name must not be empty".to_string(),
            ));
        }

        let mut df = posts_to_dataframe(posts)?;

        fs::create_dir_all(&self.output_dir).context("Creating output directory")?;
        let output_path = self.output_path();
        let mut file = File::create(&output_path).context("Creating CSV file")?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(&mut df)
            .context("Writing CSV")?;

        info!("Data saved to {}", output_path.display());
        Ok(output_path)
    }
}

/// Write `<stem>_report.json` into `output_dir`.
pub fn write_report(output_dir: &Path, stem: &str, report: &CorpusReport) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).context("Creating output directory")?;
    let report_path = output_dir.join(format!("{}_report.json", stem));

    let json = serde_json::to_string_pretty(report)?;
    fs::write(&report_path, json).context("Writing report")?;

    info!("Report saved to {}", report_path.display());
    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn sample_posts() -> Vec<CleanedPost> {
        vec![
            CleanedPost {
                id: json!(1),
                date: json!("2025-10-10T09:00:00"),
                text: "hello, world!".to_string(),
            },
            CleanedPost {
                id: json!(2),
                date: Value::Null,
                text: "привет".to_string(),
            },
        ]
    }

    #[test]
    fn test_posts_to_dataframe_shape() {
        let df = posts_to_dataframe(&sample_posts()).unwrap();

        assert_eq!(df.shape(), (2, 3));
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["id", "date", "text"]);
        assert_eq!(df.column("date").unwrap().null_count(), 1);
    }

    #[test]
    fn test_empty_posts_dataframe() {
        let df = posts_to_dataframe(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_export_writes_csv() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("out");

        let path = CsvExporter::new(&out_dir)
            .with_file_name("corpus")
            .export(&sample_posts())
            .unwrap();

        assert_eq!(path, out_dir.join("corpus.csv"));
        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("id,date,text"));
        assert_eq!(lines.next(), Some("1,2025-10-10T09:00:00,\"hello, world!\""));
        assert_eq!(lines.next(), Some("2,,привет"));
    }

    #[test]
    fn test_export_default_name() {
        let dir = TempDir::new().unwrap();
        let exporter = CsvExporter::new(dir.path());
        assert_eq!(exporter.output_path(), dir.path().join("cleaned_posts.csv"));
    }

    #[test]
    fn test_export_rejects_empty_name() {
        let dir = TempDir::new().unwrap();
        let err = CsvExporter::new(dir.path())
            .with_file_name(" ")
            .export(&sample_posts())
            .unwrap_err();
        assert_eq!(err.error_code(), "EXPORT_FAILED");
    }
}
