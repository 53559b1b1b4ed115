// file: src/ocr/mod.rs
// description: ocr subsystem module exports
// reference: internal module structure

pub mod cache;
pub mod convert;
pub mod engine;

pub use cache::ExtractionCache;
pub use convert::{DocumentConverter, OcrmypdfConverter, output_pdf_path};
pub use engine::{TesseractEngine, TextExtractor};
