// file: src/exporter/report.rs
// description: ambiguous-match listing and json report export
// reference: flat listing format plus serde_json report dump

use crate::error::{MatcherError, Result};
use crate::models::{Document, SearchReport};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// File name for the ambiguous-candidate listing. The space is part of the
/// format.
pub const MATCH_LISTING_FILE: &str = "matched files.txt";

/// Writes the newline-joined candidate paths when a search ends ambiguous.
#[derive(Debug, Clone)]
pub struct MatchListWriter {
    output_dir: PathBuf,
}

impl MatchListWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn write(&self, candidates: &[Arc<Document>]) -> Result<PathBuf> {
        let listing_path = self.output_dir.join(MATCH_LISTING_FILE);
        let body = candidates
            .iter()
            .map(|document| document.path.display().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        fs::write(&listing_path, body).map_err(|source| MatcherError::FileOperation {
            path: listing_path.clone(),
            source,
        })?;

        info!(
            "Wrote {} ambiguous candidates to {}",
            candidates.len(),
            listing_path.display()
        );
        Ok(listing_path)
    }
}

#[derive(Debug, Serialize)]
struct ExportedReport<'a> {
    exported_at: String,
    #[serde(flatten)]
    report: &'a SearchReport,
}

/// Serializes a [`SearchReport`] to a JSON file for downstream tooling.
#[derive(Debug, Clone)]
pub struct JsonReportExporter;

impl JsonReportExporter {
    pub fn export(report: &SearchReport, path: &Path, pretty: bool) -> Result<()> {
        let exported = ExportedReport {
            exported_at: Utc::now().to_rfc3339(),
            report,
        };

        let json = if pretty {
            serde_json::to_string_pretty(&exported)
        } else {
            serde_json::to_string(&exported)
        }
        .map_err(|e| MatcherError::Serialization(e.to_string()))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json).map_err(|source| MatcherError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Exported search report to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn doc(name: &str) -> Arc<Document> {
        Arc::new(Document::new(
            PathBuf::from(format!("/archive/{name}")),
            name.to_string(),
            "text".to_string(),
            0,
        ))
    }

    #[test]
    fn test_listing_is_newline_joined_paths() {
        let temp = TempDir::new().unwrap();
        let writer = MatchListWriter::new(temp.path()).unwrap();

        let listing = writer.write(&[doc("a.png"), doc("b.png")]).unwrap();

        assert_eq!(
            listing.file_name().and_then(|n| n.to_str()),
            Some(MATCH_LISTING_FILE)
        );
        let body = fs::read_to_string(listing).unwrap();
        assert_eq!(body, "/archive/a.png\n/archive/b.png");
    }

    #[test]
    fn test_writer_creates_missing_output_dir() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("reports/out");

        let writer = MatchListWriter::new(&nested).unwrap();
        writer.write(&[doc("a.png")]).unwrap();

        assert!(nested.join(MATCH_LISTING_FILE).exists());
    }

    #[test]
    fn test_json_export_contains_report_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.json");

        let mut report = SearchReport::new("John Smith", Some("20".to_string()));
        report.candidates = vec!["/archive/smith_2020.png".to_string()];

        JsonReportExporter::export(&report, &path, true).unwrap();

        let body = fs::read_to_string(path).unwrap();
        assert!(body.contains("\"query\": \"John Smith\""));
        assert!(body.contains("exported_at"));
        assert!(body.contains("smith_2020.png"));
    }
}
