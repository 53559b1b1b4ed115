// file: src/exporter/mod.rs
// description: exporter module exports
// reference: internal module structure

pub mod report;

pub use report::{JsonReportExporter, MATCH_LISTING_FILE, MatchListWriter};
