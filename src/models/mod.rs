// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod match_report;

pub use document::Document;
pub use match_report::{MatchStrategy, Resolution, SearchReport};
