//! Threshold configuration, loadable from a TOML file. Every field has a
//! default so a partial file (or none at all) is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Non-empty line count above which a function is a long method
    #[serde(default = "default_long_method_lines")]
    pub long_method_lines: usize,

    /// Parameter count above which a parameter list is long
    #[serde(default = "default_max_parameters")]
    pub max_parameters: usize,

    /// Consecutive statements per duplicate-block window
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Jaccard similarity at or above which two windows are duplicates
    #[serde(default = "default_similarity")]
    pub similarity: f64,

    /// Structural similarity above which two functions are semantic
    /// duplicates
    #[serde(default = "default_semantic_similarity")]
    pub semantic_similarity: f64,
}

fn default_long_method_lines() -> usize {
    crate::debt::smells::DEFAULT_LONG_METHOD_LINES
}

fn default_max_parameters() -> usize {
    crate::debt::smells::DEFAULT_MAX_PARAMETERS
}

fn default_window_size() -> usize {
    crate::debt::duplication::DEFAULT_WINDOW_SIZE
}

fn default_similarity() -> f64 {
    crate::debt::duplication::DEFAULT_SIMILARITY_THRESHOLD
}

fn default_semantic_similarity() -> f64 {
    crate::debt::semantic::DEFAULT_SEMANTIC_THRESHOLD
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            long_method_lines: default_long_method_lines(),
            max_parameters: default_max_parameters(),
            window_size: default_window_size(),
            similarity: default_similarity(),
            semantic_similarity: default_semantic_similarity(),
        }
    }
}

impl Thresholds {
    /// Load thresholds from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }
}
