//! Ingestion and pipeline configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default upload ceiling: 5 MiB
pub const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Default minimum number of characters left after trimming
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 50;

/// Errors loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the ingestion guard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Largest accepted upload, in bytes
    pub max_bytes: u64,

    /// Shortest accepted extracted text, in characters after trimming
    pub min_content_chars: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
        }
    }
}

impl IngestConfig {
    /// Set the upload ceiling
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Set the minimum content length
    pub fn with_min_content_chars(mut self, chars: usize) -> Self {
        self.min_content_chars = chars;
        self
    }
}

/// Configuration for the whole upload pipeline, as read from TOML:
///
/// ```toml
/// [ingest]
/// max_bytes = 5242880
/// min_content_chars = 50
///
/// [guard.audit]
/// enabled = true
/// log_file = "/var/log/telos/pii-audit.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub ingest: IngestConfig,

    #[cfg(feature = "sanitize")]
    pub guard: telos_guard::GuardConfig,
}

impl PipelineConfig {
    /// Parse from a TOML string; missing keys take their defaults
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.min_content_chars, 50);
    }

    #[test]
    fn test_builder() {
        let config = IngestConfig::default()
            .with_max_bytes(1024)
            .with_min_content_chars(10);
        assert_eq!(config.max_bytes, 1024);
        assert_eq!(config.min_content_chars, 10);
    }

    #[test]
    fn test_partial_toml() {
        let config = PipelineConfig::from_toml_str("[ingest]\nmin_content_chars = 20\n").unwrap();
        assert_eq!(config.ingest.min_content_chars, 20);
        assert_eq!(config.ingest.max_bytes, DEFAULT_MAX_BYTES);
    }

    #[cfg(feature = "sanitize")]
    #[test]
    fn test_guard_section() {
        let config =
            PipelineConfig::from_toml_str("[guard.audit]\nenabled = false\n").unwrap();
        assert!(!config.guard.audit.enabled);
        assert_eq!(config.ingest, IngestConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = PipelineConfig::from_toml_str("[ingest]\nmax_bytes = \"lots\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = PipelineConfig::load(Path::new("/nonexistent/telos.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
