//! Audit logging for Guard
//!
//! Records carry hashes and counts only; scrubbed values and the input text
//! are never written anywhere.

use crate::config::AuditConfig;
use crate::types::{AuditEntry, AuditRemoval, GuardContext, PiiMatch, ScrubResult};

use std::io::Write;

use tracing::{info, warn};

/// Audit logger
pub struct AuditLogger {
    config: AuditConfig,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Log a scrub event
    pub fn log(
        &self,
        context: &GuardContext,
        content: &str,
        matches: &[PiiMatch],
        result: &ScrubResult,
        duration_us: u64,
    ) {
        if !self.config.enabled {
            return;
        }

        let entry = AuditEntry {
            context: context.clone(),
            content_hash: hash_value(content),
            removed: matches
                .iter()
                .map(|m| AuditRemoval {
                    category: m.category,
                    value_hashes: m.values.iter().map(|v| hash_value(v)).collect(),
                })
                .collect(),
            total_removed: result.total_removed,
            processing_time_us: duration_us,
        };

        self.emit(&entry);
    }

    /// Emit an audit entry
    fn emit(&self, entry: &AuditEntry) {
        let categories: Vec<String> = entry
            .removed
            .iter()
            .map(|r| format!("{}={}", r.category, r.value_hashes.len()))
            .collect();

        info!(
            target: "telos_guard::audit",
            request_id = %entry.context.request_id,
            user_id = ?entry.context.user_id,
            session_id = ?entry.context.session_id,
            source = ?entry.context.source,
            content_hash = %entry.content_hash,
            categories = %categories.join(","),
            total_removed = entry.total_removed,
            processing_time_us = entry.processing_time_us,
            "PII scrub"
        );

        if let Some(ref path) = self.config.log_file {
            let appended = serde_json::to_string(entry)
                .map_err(std::io::Error::from)
                .and_then(|json| {
                    let mut file = std::fs::OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)?;
                    writeln!(file, "{json}")
                });

            if let Err(e) = appended {
                warn!(
                    target: "telos_guard::audit",
                    path = %path.display(),
                    error = %e,
                    "Failed to append audit record"
                );
            }
        }
    }
}

/// Hash a value for audit logging (without storing the original)
fn hash_value(value: &str) -> String {
    blake3::hash(value.as_bytes()).to_hex().to_string()
}
