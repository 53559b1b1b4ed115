// file: src/ocr/engine.rs
// description: text extraction seam backed by the tesseract binary
// reference: https://tesseract-ocr.github.io

use crate::config::OcrConfig;
use crate::error::{MatcherError, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Extraction seam. Search code only ever talks to this trait, so tests can
/// substitute canned text for a real OCR engine.
#[allow(async_fn_in_trait)]
pub trait TextExtractor {
    async fn extract_text(&self, path: &Path) -> Result<String>;
}

/// Shells out to `tesseract <file> stdout`. One process per file, no retries;
/// a failed extraction is reported to the caller and the file is skipped.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    fn extraction_error(path: &Path, message: impl Into<String>) -> MatcherError {
        MatcherError::Extraction {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

impl TextExtractor for TesseractEngine {
    async fn extract_text(&self, path: &Path) -> Result<String> {
        debug!("Running tesseract on {}", path.display());

        let mut cmd = Command::new(&self.config.tesseract_cmd);
        cmd.arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            cmd.output(),
        )
        .await
        .map_err(|_| {
            Self::extraction_error(
                path,
                format!("tesseract timed out after {}s", self.config.timeout_secs),
            )
        })?
        .map_err(|e| Self::extraction_error(path, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Self::extraction_error(path, stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
