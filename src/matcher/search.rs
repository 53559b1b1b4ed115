// file: src/matcher/search.rs
// description: exact, fallback, and year-filter search over extracted text
// reference: substring and keyword-subset matching strategies

use crate::matcher::ScannedFile;
use crate::models::Document;
use crate::ocr::{ExtractionCache, TextExtractor};
use crate::pipeline::ProgressTracker;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Minimum number of keywords that must appear in a file's text for a
/// partial match: half of the query's keywords, rounded up.
pub fn match_threshold(keyword_count: usize) -> usize {
    keyword_count.div_ceil(2)
}

/// Runs the search passes for one invocation. Extraction results are
/// memoized for the lifetime of this matcher, so the year filter never
/// re-runs OCR on a file the search pass already read. Build a fresh matcher
/// per invocation; nothing survives it.
pub struct DocumentMatcher<E: TextExtractor> {
    engine: E,
    cache: ExtractionCache,
    progress: Option<Arc<ProgressTracker>>,
}

impl<E: TextExtractor> DocumentMatcher<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            cache: ExtractionCache::new(),
            progress: None,
        }
    }

    pub fn with_progress(engine: E, progress: Arc<ProgressTracker>) -> Self {
        Self {
            engine,
            cache: ExtractionCache::new(),
            progress: Some(progress),
        }
    }

    /// Every file whose extracted text contains the whole query as a
    /// case-insensitive substring, in the order the files were supplied.
    /// A file that fails extraction is logged and skipped; the pass never
    /// aborts.
    pub async fn exact_search(&mut self, files: &[ScannedFile], query: &str) -> Vec<Arc<Document>> {
        let needle = query.to_lowercase();
        let mut matches = Vec::new();

        for file in files {
            let Some(document) = self.extract(file).await else {
                continue;
            };

            if document.contains_folded(&needle) {
                info!("Match found: {}", file.relative_path);
                self.record_match();
                matches.push(document);
            }
        }

        matches
    }

    /// Keyword-subset pass, used only when the exact pass comes back empty.
    /// A file qualifies when at least `ceil(k/2)` of the query's `k`
    /// whitespace-delimited keywords appear in its text. Single-keyword
    /// queries never qualify here.
    pub async fn fallback_search(
        &mut self,
        files: &[ScannedFile],
        query: &str,
    ) -> Vec<Arc<Document>> {
        let keywords: Vec<String> = query
            .split_whitespace()
            .map(|word| word.to_lowercase())
            .collect();

        if keywords.len() <= 1 {
            debug!("Fallback search requires more than one keyword, skipping");
            return Vec::new();
        }

        let threshold = match_threshold(keywords.len());
        let mut matches = Vec::new();

        for file in files {
            let Some(document) = self.extract(file).await else {
                continue;
            };

            let folded = document.folded_text();
            let matched_words = keywords
                .iter()
                .filter(|keyword| folded.contains(keyword.as_str()))
                .count();

            if matched_words >= threshold {
                info!(
                    "Partial match found: {} ({}/{} keywords)",
                    file.relative_path,
                    matched_words,
                    keywords.len()
                );
                self.record_match();
                matches.push(document);
            }
        }

        matches
    }

    /// Keeps candidates whose text also contains the year token. Reads the
    /// memoized text, so an empty candidate set costs nothing and a populated
    /// one costs no further OCR.
    pub fn year_filter(&self, candidates: Vec<Arc<Document>>, year: &str) -> Vec<Arc<Document>> {
        let needle = year.to_lowercase();
        candidates
            .into_iter()
            .filter(|document| document.contains_folded(&needle))
            .collect()
    }

    async fn extract(&mut self, file: &ScannedFile) -> Option<Arc<Document>> {
        if let Some(entry) = self.cache.lookup(&file.path) {
            return entry;
        }

        match self.engine.extract_text(&file.path).await {
            Ok(text) => {
                let document = Arc::new(Document::new(
                    file.path.clone(),
                    file.relative_path.clone(),
                    text,
                    file.modified,
                ));
                self.cache.store(file.path.clone(), document.clone());
                if let Some(progress) = &self.progress {
                    progress.inc_files_processed();
                    progress.add_bytes_processed(document.text_len);
                }
                Some(document)
            }
            Err(e) => {
                warn!("Error processing {}: {}", file.relative_path, e);
                self.cache.store_failure(file.path.clone());
                if let Some(progress) = &self.progress {
                    progress.inc_files_failed();
                }
                None
            }
        }
    }

    fn record_match(&self) {
        if let Some(progress) = &self.progress {
            progress.add_match();
        }
    }
}
