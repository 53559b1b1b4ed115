// file: src/models/document.rs
// description: core document model holding extracted ocr text
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// A file plus the text OCR pulled out of it. Identity is the path; the
/// text is fixed once extraction has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub path: PathBuf,
    pub relative_path: String,
    pub text: String,
    pub text_hash: String,
    pub text_len: u64,
    pub last_modified: u64,
    pub extracted_at: u64,
}

impl Document {
    pub fn new(path: PathBuf, relative_path: String, text: String, last_modified: u64) -> Self {
        let text_hash = Self::compute_hash(&text);
        let text_len = text.len() as u64;
        let extracted_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        Self {
            path,
            relative_path,
            text,
            text_hash,
            text_len,
            last_modified,
            extracted_at,
        }
    }

    fn compute_hash(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Extracted text lowered for case-insensitive matching.
    pub fn folded_text(&self) -> String {
        self.text.to_lowercase()
    }

    /// Case-insensitive substring check against the extracted text. The
    /// needle must already be lowercased by the caller.
    pub fn contains_folded(&self, needle: &str) -> bool {
        self.folded_text().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new(
            PathBuf::from("/archive/smith_2020.png"),
            "smith_2020.png".to_string(),
            "John Smith 2020 Enrollment".to_string(),
            1234567890,
        )
    }

    #[test]
    fn test_document_creation() {
        let doc = sample();
        assert_eq!(doc.path, PathBuf::from("/archive/smith_2020.png"));
        assert!(!doc.text_hash.is_empty());
        assert_eq!(doc.text_len, 26);
        assert_eq!(doc.last_modified, 1234567890);
    }

    #[test]
    fn test_hash_consistency() {
        let text = "Extracted text";
        let hash1 = Document::compute_hash(text);
        let hash2 = Document::compute_hash(text);
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_contains_folded_is_case_insensitive() {
        let doc = sample();
        assert!(doc.contains_folded("john smith"));
        assert!(doc.contains_folded("enrollment"));
        assert!(doc.contains_folded("20"));
        assert!(!doc.contains_folded("jane doe"));
    }
}
