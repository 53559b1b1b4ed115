// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod matcher;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod utils;

pub use config::{Config, OcrConfig, PathsConfig, SearchConfig};
pub use error::{MatcherError, Result};
pub use exporter::{JsonReportExporter, MATCH_LISTING_FILE, MatchListWriter};
pub use matcher::{
    AmbiguityPolicy, DocumentMatcher, FileScanner, ResolveDecision, Resolver, ScannedFile,
    match_threshold,
};
pub use models::{Document, MatchStrategy, Resolution, SearchReport};
pub use ocr::{
    DocumentConverter, ExtractionCache, OcrmypdfConverter, TesseractEngine, TextExtractor,
};
pub use pipeline::{PipelineStats, ProgressTracker, SearchOrchestrator, SearchRequest};
pub use utils::{OperationTimer, Validator};
