//! Configuration for TELOS Guard

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for Guard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Audit configuration
    pub audit: AuditConfig,
}

impl GuardConfig {
    /// Scrub only, no audit records
    pub fn quiet() -> Self {
        Self {
            audit: AuditConfig {
                enabled: false,
                ..Default::default()
            },
        }
    }

    /// Set the audit configuration
    pub fn with_audit(mut self, audit: AuditConfig) -> Self {
        self.audit = audit;
        self
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging
    pub enabled: bool,
    /// Append JSON-lines records to this file as well as to `tracing`
    pub log_file: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: None,
        }
    }
}

impl AuditConfig {
    /// Write records to a JSON-lines file
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}
