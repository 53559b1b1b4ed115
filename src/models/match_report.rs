// file: src/models/match_report.rs
// description: search outcome model covering strategy, candidates, and resolution
// reference: internal data structures

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Which search pass produced the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Exact,
    Partial,
}

/// Terminal outcome of one search run. No outcome is reversible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Resolution {
    NoMatch,
    Converted { output: PathBuf },
    ConversionFailed { message: String },
    Ambiguous { listing: Option<PathBuf> },
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub run_id: Uuid,
    pub query: String,
    pub year: Option<String>,
    pub strategy: Option<MatchStrategy>,
    pub candidates: Vec<String>,
    pub resolution: Resolution,
    pub started_at: String,
    pub duration_ms: u64,
}

impl SearchReport {
    pub fn new(query: impl Into<String>, year: Option<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            query: query.into(),
            year,
            strategy: None,
            candidates: Vec::new(),
            resolution: Resolution::NoMatch,
            started_at: Utc::now().to_rfc3339(),
            duration_ms: 0,
        }
    }

    pub fn is_match(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// One-line outcome string for display.
    pub fn format_summary(&self) -> String {
        match &self.resolution {
            Resolution::NoMatch => "no matching documents found".to_string(),
            Resolution::Converted { output } => {
                format!("converted to {}", output.display())
            }
            Resolution::ConversionFailed { message } => {
                format!("conversion failed: {}", message)
            }
            Resolution::Ambiguous { listing: Some(path) } => format!(
                "{} candidates remain ambiguous, listing written to {}",
                self.candidates.len(),
                path.display()
            ),
            Resolution::Ambiguous { listing: None } => {
                format!("{} candidates remain ambiguous", self.candidates.len())
            }
            Resolution::Skipped => {
                format!("{} candidate(s) found, conversion skipped", self.candidates.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_starts_unresolved() {
        let report = SearchReport::new("John Smith", Some("20".to_string()));
        assert_eq!(report.resolution, Resolution::NoMatch);
        assert!(report.strategy.is_none());
        assert!(!report.is_match());
        assert_eq!(report.year.as_deref(), Some("20"));
    }

    #[test]
    fn test_format_summary_converted() {
        let mut report = SearchReport::new("John Smith", None);
        report.candidates = vec!["/archive/smith_2020.png".to_string()];
        report.resolution = Resolution::Converted {
            output: PathBuf::from("/out/smith_2020.pdf"),
        };
        assert!(report.format_summary().contains("smith_2020.pdf"));
        assert!(report.is_match());
    }

    #[test]
    fn test_format_summary_ambiguous_with_listing() {
        let mut report = SearchReport::new("John Smith", None);
        report.candidates = vec!["a.png".to_string(), "b.png".to_string()];
        report.resolution = Resolution::Ambiguous {
            listing: Some(PathBuf::from("/out/matched files.txt")),
        };
        let summary = report.format_summary();
        assert!(summary.contains("2 candidates"));
        assert!(summary.contains("matched files.txt"));
    }

    #[test]
    fn test_resolution_serializes_with_outcome_tag() {
        let resolution = Resolution::Converted {
            output: PathBuf::from("/out/a.pdf"),
        };
        let json = serde_json::to_string(&resolution).unwrap();
        assert!(json.contains("\"outcome\":\"converted\""));
    }
}
