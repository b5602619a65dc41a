//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the recr pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecrConfig {
    /// Document source configuration.
    pub source: SourceConfig,

    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Export configuration.
    pub export: ExportConfig,
}

impl Default for RecrConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            extraction: ExtractionConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// Document source (shared folder) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// API key for the document source. Falls back to the
    /// `GOOGLE_DRIVE_API_KEY` environment variable when unset.
    pub api_key: Option<String>,

    /// Maximum number of listing entries per request.
    pub page_size: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            page_size: 100,
        }
    }
}

/// Extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How many characters of the source text to keep on each receipt for
    /// review/debugging. 0 disables the preview.
    pub raw_text_preview: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            raw_text_preview: 500,
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Currency symbol prefixed to the spreadsheet amount format.
    pub currency_symbol: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

impl RecrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
