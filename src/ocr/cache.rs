// file: src/ocr/cache.rs
// description: per-invocation memo of extraction results, including failures
// reference: single-run cache, nothing persists between searches

use crate::models::Document;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Memoizes extraction results for the lifetime of one search invocation.
/// A `None` entry records a failed extraction: the file stays skipped for the
/// rest of the run and is never retried. Nothing is carried across runs, so a
/// fresh invocation always re-runs OCR.
#[derive(Debug, Default)]
pub struct ExtractionCache {
    entries: HashMap<PathBuf, Option<Arc<Document>>>,
}

impl ExtractionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer `None` means the path has not been seen this run; `Some(None)`
    /// means extraction already failed for it.
    pub fn lookup(&self, path: &Path) -> Option<Option<Arc<Document>>> {
        self.entries.get(path).cloned()
    }

    pub fn store(&mut self, path: PathBuf, document: Arc<Document>) {
        debug!("Caching extracted text for {}", path.display());
        self.entries.insert(path, Some(document));
    }

    pub fn store_failure(&mut self, path: PathBuf) {
        debug!("Recording failed extraction for {}", path.display());
        self.entries.insert(path, None);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
