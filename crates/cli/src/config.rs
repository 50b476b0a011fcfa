//! Configuration file support for the preparation pipeline

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub clean: CleanConfig,
    #[serde(default)]
    pub format: FormatConfig,
}

impl PipelineConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                extension
            )),
        }
    }

    /// Save configuration to a file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let content = match extension {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string_pretty(self)?,
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                    extension
                ))
            }
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Cleaning stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanConfig {
    /// Column holding the article body
    #[serde(default = "default_text_column")]
    pub text_column: String,
    /// Column holding the reference summary
    #[serde(default = "default_summary_column")]
    pub summary_column: String,
    /// Columns dropped before cleaning
    #[serde(default)]
    pub drop_columns: Vec<String>,
    /// Seeded sub-sample fraction in (0, 1]
    #[serde(default)]
    pub sample_fraction: Option<f64>,
    /// Remove exact duplicate rows
    #[serde(default = "default_true")]
    pub dedup: bool,
    /// Remove rows with missing text
    #[serde(default = "default_true")]
    pub drop_missing: bool,
    /// Apply the full text normalization
    #[serde(default)]
    pub normalize: bool,
    /// Word-count ceiling for the text column
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            text_column: default_text_column(),
            summary_column: default_summary_column(),
            drop_columns: Vec::new(),
            sample_fraction: None,
            dedup: true,
            drop_missing: true,
            normalize: false,
            max_words: default_max_words(),
        }
    }
}

/// Formatting stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(default = "default_train_size")]
    pub train_size: usize,
    #[serde(default = "default_val_size")]
    pub val_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            train_size: default_train_size(),
            val_size: default_val_size(),
        }
    }
}

fn default_text_column() -> String {
    "article".to_string()
}

fn default_summary_column() -> String {
    "highlights".to_string()
}

fn default_max_words() -> usize {
    500
}

fn default_train_size() -> usize {
    sumprep_prep::DEFAULT_TRAIN_SIZE
}

fn default_val_size() -> usize {
    sumprep_prep::DEFAULT_VAL_SIZE
}

fn default_true() -> bool {
    true
}
