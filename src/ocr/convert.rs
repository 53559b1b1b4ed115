// file: src/ocr/convert.rs
// description: searchable-pdf conversion via the ocrmypdf binary
// reference: https://ocrmypdf.readthedocs.io

use crate::config::OcrConfig;
use crate::error::{MatcherError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::info;

/// Conversion seam, mirrored on [`TextExtractor`](crate::ocr::TextExtractor):
/// real runs shell out, tests substitute a fake that just touches the output
/// file.
#[allow(async_fn_in_trait)]
pub trait DocumentConverter {
    /// Converts `source` into a searchable PDF named after the source's stem
    /// inside `output_dir`, returning the output path.
    async fn convert(&self, source: &Path, output_dir: &Path) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct OcrmypdfConverter {
    config: OcrConfig,
}

impl OcrmypdfConverter {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    fn conversion_error(path: &Path, message: impl Into<String>) -> MatcherError {
        MatcherError::Conversion {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Builds the output file path: source stem, `.pdf` extension, inside the
/// output folder.
pub fn output_pdf_path(source: &Path, output_dir: &Path) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| MatcherError::Conversion {
            path: source.to_path_buf(),
            message: "source has no usable file stem".to_string(),
        })?;

    Ok(output_dir.join(format!("{stem}.pdf")))
}

impl DocumentConverter for OcrmypdfConverter {
    async fn convert(&self, source: &Path, output_dir: &Path) -> Result<PathBuf> {
        let output_file = output_pdf_path(source, output_dir)?;

        info!(
            "Converting {} to {}",
            source.display(),
            output_file.display()
        );

        let mut cmd = Command::new(&self.config.ocrmypdf_cmd);
        if self.config.deskew {
            cmd.arg("--deskew");
        }
        if self.config.force_ocr {
            cmd.arg("--force-ocr");
        }
        if let Some(dpi) = self.config.image_dpi {
            cmd.arg("--image-dpi").arg(dpi.to_string());
        }
        cmd.arg("--output-type")
            .arg("pdf")
            .arg("-l")
            .arg(&self.config.language)
            .arg(source)
            .arg(&output_file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            cmd.output(),
        )
        .await
        .map_err(|_| {
            Self::conversion_error(
                source,
                format!("ocrmypdf timed out after {}s", self.config.timeout_secs),
            )
        })?
        .map_err(|e| Self::conversion_error(source, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Self::conversion_error(source, stderr.trim().to_string()));
        }

        info!("Successfully converted to: {}", output_file.display());
        Ok(output_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_output_path_uses_stem_and_pdf_extension() {
        let out = output_pdf_path(Path::new("/archive/smith_2020.png"), Path::new("/out")).unwrap();
        assert_eq!(out, PathBuf::from("/out/smith_2020.pdf"));
    }

    #[test]
    fn test_output_path_for_pdf_source_keeps_stem() {
        let out = output_pdf_path(Path::new("/archive/report.pdf"), Path::new("/out")).unwrap();
        assert_eq!(out, PathBuf::from("/out/report.pdf"));
    }

    #[tokio::test]
    async fn test_missing_binary_surfaces_conversion_error() {
        let mut config = Config::default_config().ocr;
        config.ocrmypdf_cmd = "ocrmypdf-binary-that-does-not-exist".to_string();
        let converter = OcrmypdfConverter::new(config);

        let temp = tempfile::TempDir::new().unwrap();
        let result = converter
            .convert(Path::new("/archive/a.png"), temp.path())
            .await;
        assert!(matches!(result, Err(MatcherError::Conversion { .. })));
    }
}
