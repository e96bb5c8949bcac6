//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::error::SupplinkError;
use std::path::PathBuf;

/// Main configuration for supplink.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplinkConfig {
    /// Narration extraction configuration.
    pub extraction: ExtractionConfig,

    /// Supplier resolution configuration.
    pub resolver: ResolverConfig,

    /// Supplier store configuration.
    pub store: StoreConfig,
}

/// Narration extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters of the narration kept in each failure record.
    pub journal_excerpt_len: usize,

    /// Additional phrases that mark a narration as not referring to a supplier.
    pub extra_ignore_phrases: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            journal_excerpt_len: 120,
            extra_ignore_phrases: Vec::new(),
        }
    }
}

/// Supplier resolution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Jaccard similarity a fuzzy match must exceed (0.0 - 1.0).
    pub fuzzy_threshold: f64,

    /// Minimum score for similarity suggestions (0.0 - 1.0).
    pub suggestion_threshold: f64,

    /// Maximum suppliers fetched from the store per similarity query.
    pub candidate_limit: usize,

    /// Maximum suggestions returned.
    pub suggestion_limit: usize,

    /// Characters of the origin narration stored on auto-created suppliers.
    pub origin_excerpt_len: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.75,
            suggestion_threshold: 0.5,
            candidate_limit: 20,
            suggestion_limit: 5,
            origin_excerpt_len: 500,
        }
    }
}

/// Supplier store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding the supplier records.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("suppliers.json"),
        }
    }
}

impl SupplinkConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Load and validate configuration from a JSON file.
    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        let config = Self::from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> crate::error::Result<()> {
        let thresholds = [
            ("resolver.fuzzy_threshold", self.resolver.fuzzy_threshold),
            ("resolver.suggestion_threshold", self.resolver.suggestion_threshold),
        ];
        for (key, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(SupplinkError::Config(format!(
                    "{key} must be between 0 and 1, got {value}"
                )));
            }
        }

        if self.resolver.candidate_limit == 0 {
            return Err(SupplinkError::Config(
                "resolver.candidate_limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
