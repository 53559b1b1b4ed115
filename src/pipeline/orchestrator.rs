// file: src/pipeline/orchestrator.rs
// description: coordinates scanning, search passes, resolution, and conversion
// reference: linear search workflow, one file at a time

use crate::config::Config;
use crate::error::{MatcherError, Result};
use crate::exporter::MatchListWriter;
use crate::matcher::{AmbiguityPolicy, DocumentMatcher, FileScanner, ResolveDecision, Resolver};
use crate::models::{MatchStrategy, Resolution, SearchReport};
use crate::ocr::{DocumentConverter, TextExtractor};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::utils::{OperationTimer, Validator};
use std::fs;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub year: Option<String>,
    pub policy: AmbiguityPolicy,
    pub dry_run: bool,
}

/// Drives one search invocation end to end: exact pass, fallback pass when
/// the exact pass is empty, optional year filter, resolution, conversion.
/// Consumes itself on `run`: every invocation starts from a fresh
/// orchestrator with an empty extraction cache, and no step is revisited.
pub struct SearchOrchestrator<E: TextExtractor, C: DocumentConverter> {
    config: Config,
    engine: E,
    converter: C,
}

impl<E: TextExtractor, C: DocumentConverter> SearchOrchestrator<E, C> {
    pub fn new(config: Config, engine: E, converter: C) -> Self {
        Self {
            config,
            engine,
            converter,
        }
    }

    pub async fn run(self, request: &SearchRequest) -> Result<(SearchReport, PipelineStats)> {
        let Self {
            config,
            engine,
            converter,
        } = self;

        // all input validation happens before any OCR work starts
        Validator::validate_query(&request.query)?;
        if let Some(year) = &request.year {
            Validator::validate_year(year)?;
        }
        Validator::validate_input_root(&config.paths.input_root)?;
        Validator::validate_output_root(&config.paths.output_root)?;

        let timer = OperationTimer::new("document search");
        let started = Instant::now();
        let mut report = SearchReport::new(request.query.clone(), request.year.clone());

        info!(
            "Searching for \"{}\" in {}",
            request.query,
            config.paths.input_root.display()
        );

        let scanner = FileScanner::new(config.search.clone());
        let files = scanner.scan_directory(&config.paths.input_root)?;

        if files.is_empty() {
            warn!(
                "No eligible files under {}",
                config.paths.input_root.display()
            );
            report.duration_ms = started.elapsed().as_millis() as u64;
            timer.finish();
            return Ok((report, PipelineStats::new()));
        }

        let progress = Arc::new(ProgressTracker::new(files.len()));
        let mut matcher = DocumentMatcher::with_progress(engine, progress.clone());

        let mut candidates = matcher.exact_search(&files, &request.query).await;
        let mut strategy = (!candidates.is_empty()).then_some(MatchStrategy::Exact);

        if candidates.is_empty() {
            info!("No exact matches found. Trying partial match...");
            candidates = matcher.fallback_search(&files, &request.query).await;
            if !candidates.is_empty() {
                strategy = Some(MatchStrategy::Partial);
            }
        }

        if let Some(year) = &request.year
            && !candidates.is_empty()
        {
            info!("Filtering by year: {}", year);
            candidates = matcher.year_filter(candidates, year);
        }

        report.strategy = strategy;
        report.candidates = candidates
            .iter()
            .map(|document| document.path.display().to_string())
            .collect();

        let resolver = Resolver::new(request.policy);
        report.resolution = match resolver.resolve(candidates) {
            ResolveDecision::NoMatch => Resolution::NoMatch,
            ResolveDecision::Convert(document) => {
                if request.dry_run {
                    info!("Dry run, skipping conversion of {}", document.path.display());
                    Resolution::Skipped
                } else {
                    fs::create_dir_all(&config.paths.output_root).map_err(|source| {
                        MatcherError::FileOperation {
                            path: config.paths.output_root.clone(),
                            source,
                        }
                    })?;

                    match converter
                        .convert(&document.path, &config.paths.output_root)
                        .await
                    {
                        Ok(output) => Resolution::Converted { output },
                        Err(e) => {
                            error!("Error converting {}: {}", document.path.display(), e);
                            Resolution::ConversionFailed {
                                message: e.to_string(),
                            }
                        }
                    }
                }
            }
            ResolveDecision::Ambiguous {
                candidates,
                write_listing,
            } => {
                if write_listing && !request.dry_run {
                    let writer = MatchListWriter::new(&config.paths.output_root)?;
                    let listing = writer.write(&candidates)?;
                    Resolution::Ambiguous {
                        listing: Some(listing),
                    }
                } else {
                    Resolution::Ambiguous { listing: None }
                }
            }
        };

        report.duration_ms = started.elapsed().as_millis() as u64;

        let stats = progress.get_stats();
        progress.finish();
        timer.finish();
        log_final_stats(&stats, &report);

        Ok((report, stats))
    }
}

fn log_final_stats(stats: &PipelineStats, report: &SearchReport) {
    info!("=== Search Execution Summary ===");
    info!("Duration: {} ms", report.duration_ms);
    info!("Files OCR'd: {}", stats.files_processed);
    info!("Files failed: {}", stats.files_failed);
    info!("Success rate: {:.2}%", stats.success_rate());
    info!("Matches found: {}", stats.matches_found);
    info!("Outcome: {}", report.format_summary());
    info!("================================");
}
