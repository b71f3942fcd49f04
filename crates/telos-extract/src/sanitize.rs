//! Upload-to-prompt pipeline: ingestion followed by PII scrubbing

use crate::{
    config::PipelineConfig,
    error::IngestError,
    ingest::Ingestor,
    result::{ExtractedText, UploadedDocument},
    sniff::DocumentFormat,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use telos_guard::{Guard, GuardContext, PiiFinding};

/// What the prompt-building and storage layers receive for an upload.
///
/// Carries the cleaned text only; the extracted original is dropped inside
/// [`Pipeline::process`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrubbedDocument {
    pub filename: String,
    pub mime: String,
    pub format: DocumentFormat,
    /// Extracted text with every PII match replaced by its token
    pub cleaned: String,
    pub findings: Vec<PiiFinding>,
    pub total_removed: usize,
    /// One-line report, e.g. "Found and removed: 1 phone number"
    pub summary: String,
}

impl ScrubbedDocument {
    /// Whether the UI should show the privacy notice
    pub fn has_removals(&self) -> bool {
        self.total_removed > 0
    }
}

/// Ingestor and Guard wired together
pub struct Pipeline {
    ingestor: Ingestor,
    guard: Guard,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            ingestor: Ingestor::new(config.ingest),
            guard: Guard::new(config.guard),
        }
    }

    pub fn ingestor(&self) -> &Ingestor {
        &self.ingestor
    }

    /// Ingest an upload and scrub its text
    pub async fn process(&self, doc: &UploadedDocument) -> Result<ScrubbedDocument, IngestError> {
        self.process_with_context(doc, GuardContext::new()).await
    }

    /// Ingest an upload and scrub its text, tagging the audit record
    pub async fn process_with_context(
        &self,
        doc: &UploadedDocument,
        context: GuardContext,
    ) -> Result<ScrubbedDocument, IngestError> {
        let extracted = self.ingestor.ingest(doc).await?;
        Ok(self.scrub(extracted, context))
    }

    /// Read, ingest and scrub a file on disk
    pub async fn process_path(&self, path: &Path) -> Result<ScrubbedDocument, IngestError> {
        let extracted = self.ingestor.ingest_path(path).await?;
        Ok(self.scrub(extracted, GuardContext::new()))
    }

    fn scrub(&self, extracted: ExtractedText, context: GuardContext) -> ScrubbedDocument {
        let context = context.with_source(extracted.filename.clone());
        let (scrubbed, summary) = self.guard.scrub_and_summarize(&extracted.text, &context);

        ScrubbedDocument {
            filename: extracted.filename,
            mime: extracted.mime,
            format: extracted.format,
            cleaned: scrubbed.cleaned,
            findings: scrubbed.findings,
            total_removed: scrubbed.total_removed,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngestConfig;
    use telos_guard::{GuardConfig, PiiCategory};

    fn pipeline() -> Pipeline {
        Pipeline::new(PipelineConfig {
            ingest: IngestConfig::default(),
            guard: GuardConfig::quiet(),
        })
    }

    #[tokio::test]
    async fn test_clean_document() {
        let text = "We build open tools that help communities plan resilient local food systems.";
        let doc = UploadedDocument::new(text, "mission.txt");
        let scrubbed = pipeline().process(&doc).await.unwrap();

        assert_eq!(scrubbed.cleaned, text);
        assert_eq!(scrubbed.summary, "No PII detected");
        assert!(!scrubbed.has_removals());
    }

    #[tokio::test]
    async fn test_pii_never_leaves_pipeline() {
        let text = "Jane Roe, product lead. Email jane.roe@example.org, phone 555-123-4567, \
                    SSN 123-45-6789. Previously at a design studio for six years.";
        let doc = UploadedDocument::new(text, "cv.txt");
        let scrubbed = pipeline().process(&doc).await.unwrap();

        assert!(!scrubbed.cleaned.contains("jane.roe@example.org"));
        assert!(!scrubbed.cleaned.contains("555-123-4567"));
        assert!(!scrubbed.cleaned.contains("123-45-6789"));
        assert_eq!(scrubbed.total_removed, 3);
        assert_eq!(
            scrubbed.findings,
            vec![
                PiiFinding::new(PiiCategory::Phone, 1),
                PiiFinding::new(PiiCategory::Email, 1),
                PiiFinding::new(PiiCategory::Ssn, 1),
            ]
        );
        assert_eq!(
            scrubbed.summary,
            "Found and removed: 1 phone number, 1 email address, 1 SSN"
        );
    }

    #[tokio::test]
    async fn test_ingest_errors_pass_through() {
        let doc = UploadedDocument::new("hi", "short.txt");
        let err = pipeline().process(&doc).await.unwrap_err();
        assert_eq!(err.code(), "EMPTY_CONTENT");
    }

    #[tokio::test]
    async fn test_serialized_shape() {
        let doc = UploadedDocument::new(
            "Reach the founders at founders@example.com with questions about the program.",
            "contact.txt",
        );
        let scrubbed = pipeline().process(&doc).await.unwrap();
        let json = serde_json::to_value(&scrubbed).unwrap();

        assert_eq!(json["totalRemoved"], 1);
        assert_eq!(json["format"], "plain-text");
        assert_eq!(json["findings"][0]["type"], "email");
        assert!(json.get("text").is_none());
    }
}
