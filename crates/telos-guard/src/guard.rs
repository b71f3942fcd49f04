//! Main Guard implementation

use crate::audit::AuditLogger;
use crate::config::GuardConfig;
use crate::pii::PiiScrubber;
use crate::report::format_summary;
use crate::types::{GuardContext, ScrubResult};
use std::time::Instant;

/// Scrubs text before it is handed to a prompt builder or a store, and
/// leaves an audit record of what was removed.
pub struct Guard {
    scrubber: PiiScrubber,
    audit_logger: AuditLogger,
}

impl Default for Guard {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}

impl Guard {
    /// Create a new Guard with the given configuration
    pub fn new(config: GuardConfig) -> Self {
        Self {
            scrubber: PiiScrubber::new(),
            audit_logger: AuditLogger::new(config.audit),
        }
    }

    /// Scrub text with a fresh context
    pub fn scrub(&self, text: &str) -> ScrubResult {
        self.scrub_with_context(text, &GuardContext::default())
    }

    /// Scrub text, tagging the audit record with `context`
    pub fn scrub_with_context(&self, text: &str, context: &GuardContext) -> ScrubResult {
        let start = Instant::now();
        let result = self.scrubber.scrub(text);

        if self.audit_logger.is_enabled() {
            let matches = if result.is_modified() {
                self.scrubber.detect(text)
            } else {
                Vec::new()
            };
            self.audit_logger.log(
                context,
                text,
                &matches,
                &result,
                start.elapsed().as_micros() as u64,
            );
        }

        result
    }

    /// Scrub text and render its summary line
    pub fn scrub_and_summarize(&self, text: &str, context: &GuardContext) -> (ScrubResult, String) {
        let result = self.scrub_with_context(text, context);
        let summary = format_summary(&result.findings);
        (result, summary)
    }

    /// Create a builder for Guard
    pub fn builder() -> GuardBuilder {
        GuardBuilder::new()
    }
}

/// Builder for Guard configuration
pub struct GuardBuilder {
    config: GuardConfig,
}

impl GuardBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: GuardConfig::default(),
        }
    }

    /// Disable audit records
    pub fn quiet(mut self) -> Self {
        self.config = GuardConfig::quiet();
        self
    }

    /// Configure audit logging
    pub fn with_audit(mut self, config: crate::config::AuditConfig) -> Self {
        self.config.audit = config;
        self
    }

    /// Build the Guard
    pub fn build(self) -> Guard {
        Guard::new(self.config)
    }
}

impl Default for GuardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use crate::types::PiiCategory;

    #[test]
    fn test_clean_input() {
        let guard = Guard::builder().quiet().build();
        let result = guard.scrub("Hello, how are you?");

        assert!(!result.is_modified());
        assert_eq!(result.cleaned, "Hello, how are you?");
    }

    #[test]
    fn test_pii_redaction() {
        let guard = Guard::default();
        let result = guard.scrub("My SSN is 123-45-6789");

        assert!(result.is_modified());
        assert!(!result.cleaned.contains("123-45-6789"));
        assert!(result.cleaned.contains("[SSN_REMOVED]"));
        assert_eq!(result.count_for(PiiCategory::Ssn), 1);
    }

    #[test]
    fn test_summary() {
        let guard = Guard::builder().quiet().build();
        let ctx = GuardContext::new().with_source("cv.txt");
        let (result, summary) =
            guard.scrub_and_summarize("write to a@b.com or b@c.com", &ctx);

        assert_eq!(result.total_removed, 2);
        assert_eq!(summary, "Found and removed: 2 email addresses");
    }

    #[test]
    fn test_context_reaches_audit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let guard = Guard::builder()
            .with_audit(AuditConfig::default().with_log_file(&path))
            .build();

        let context = GuardContext::new()
            .with_user_id("user123")
            .with_session_id("session456");
        guard.scrub_with_context("Hello", &context);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("session456"));
        assert!(written.contains(&context.request_id.to_string()));
    }
}
