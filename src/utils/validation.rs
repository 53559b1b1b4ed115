// file: src/utils/validation.rs
// description: input validation run before any search work starts
// reference: input validation patterns

use crate::error::{MatcherError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    // two-digit year field, four digits tolerated
    static ref YEAR_TOKEN: Regex = Regex::new(r"^\d{2}(\d{2})?$").expect("YEAR_TOKEN regex is valid");
}

pub struct Validator;

impl Validator {
    pub fn validate_input_root(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(MatcherError::Validation(format!(
                "Input folder does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(MatcherError::Validation(format!(
                "Input path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// The output root may not exist yet (it is created on first write), but
    /// an existing non-directory is rejected up front.
    pub fn validate_output_root(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(MatcherError::Validation(
                "Output folder is not set".to_string(),
            ));
        }

        if path.exists() && !path.is_dir() {
            return Err(MatcherError::Validation(format!(
                "Output path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_query(query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(MatcherError::Validation(
                "Search name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_year(year: &str) -> Result<()> {
        if !YEAR_TOKEN.is_match(year) {
            return Err(MatcherError::Validation(format!(
                "Year must be two or four digits, got \"{year}\""
            )));
        }
        Ok(())
    }

    pub fn truncate_text(text: &str, max_length: usize) -> String {
        if text.len() <= max_length {
            text.to_string()
        } else {
            format!("{}...", &text[..max_length])
        }
    }
}
