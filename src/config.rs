// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{MatcherError, Result};
use crate::matcher::AmbiguityPolicy;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub search: SearchConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub extensions: Vec<String>,
    #[serde(default)]
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
    #[serde(default)]
    pub on_ambiguous: AmbiguityPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OcrConfig {
    pub tesseract_cmd: String,
    pub ocrmypdf_cmd: String,
    pub language: String,
    pub timeout_secs: u64,
    pub deskew: bool,
    pub force_ocr: bool,
    pub image_dpi: Option<u32>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DOC_MATCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| MatcherError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| MatcherError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            paths: PathsConfig {
                input_root: PathBuf::from("./scans"),
                output_root: PathBuf::from("./converted"),
            },
            search: SearchConfig {
                extensions: vec![
                    "pdf".to_string(),
                    "jpg".to_string(),
                    "jpeg".to_string(),
                    "png".to_string(),
                    "bmp".to_string(),
                    "tif".to_string(),
                    "tiff".to_string(),
                ],
                skip_patterns: vec![],
                max_file_size_mb: 50,
                on_ambiguous: AmbiguityPolicy::List,
            },
            ocr: OcrConfig {
                tesseract_cmd: "tesseract".to_string(),
                ocrmypdf_cmd: "ocrmypdf".to_string(),
                language: "eng".to_string(),
                timeout_secs: 120,
                deskew: true,
                force_ocr: true,
                image_dpi: Some(300),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.search.extensions.is_empty() {
            return Err(MatcherError::Config(
                "at least one supported extension is required".to_string(),
            ));
        }

        if self
            .search
            .extensions
            .iter()
            .any(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(MatcherError::Config(
                "extensions must be bare suffixes without a leading dot".to_string(),
            ));
        }

        if self.search.max_file_size_mb == 0 {
            return Err(MatcherError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        if self.ocr.timeout_secs == 0 {
            return Err(MatcherError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.ocr.language.trim().is_empty() {
            return Err(MatcherError::Config(
                "ocr language must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert!(config.search.extensions.contains(&"tiff".to_string()));
        assert_eq!(config.search.on_ambiguous, AmbiguityPolicy::List);
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let mut config = Config::default_config();
        config.search.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_dotted_extensions() {
        let mut config = Config::default_config();
        config.search.extensions = vec![".png".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default_config();
        config.ocr.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
