//! Ingestion guard: size ceiling, format resolution, extraction, content check

use crate::{
    config::IngestConfig,
    docx::DocxExtractor,
    error::{ExtractError, IngestError},
    pdf::PdfExtractor,
    result::{ExtractedText, UploadedDocument},
    sniff::{sniff, Detection, DocumentFormat},
    text::TextExtractor,
    Extractor,
};
use std::path::Path;
use tracing::{debug, info, warn};

/// Runs an upload through every ingestion check.
///
/// Checks happen in a fixed order and stop at the first failure: size,
/// format, extraction, minimum content. The size check runs before the
/// buffer is even sniffed.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    config: IngestConfig,
    pdf: PdfExtractor,
    docx: DocxExtractor,
    text: TextExtractor,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            pdf: PdfExtractor::new(),
            docx: DocxExtractor::new(),
            text: TextExtractor::new(),
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Reject a declared length over the ceiling.
    ///
    /// Upload handlers can call this with a `Content-Length` before reading
    /// the body.
    pub fn check_size(&self, len: u64) -> Result<(), IngestError> {
        if len > self.config.max_bytes {
            return Err(IngestError::FileTooLarge {
                size: len,
                max: self.config.max_bytes,
            });
        }
        Ok(())
    }

    /// Extract and validate the text of an upload
    pub async fn ingest(&self, doc: &UploadedDocument) -> Result<ExtractedText, IngestError> {
        let result = self.run(doc).await;

        match &result {
            Ok(extracted) => info!(
                filename = %doc.filename,
                format = %extracted.format,
                bytes = extracted.byte_length,
                chars = extracted.char_count,
                "Ingested upload"
            ),
            Err(e) => warn!(
                filename = %doc.filename,
                declared_content_type = ?doc.declared_content_type,
                code = e.code(),
                error = %e,
                "Rejected upload"
            ),
        }

        result
    }

    /// Read a file from disk and ingest it.
    ///
    /// The size ceiling is checked against file metadata, so oversized files
    /// are never read.
    pub async fn ingest_path(&self, path: &Path) -> Result<ExtractedText, IngestError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| IngestError::ExtractionFailed(ExtractError::Io(e)))?;
        self.check_size(metadata.len())?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| IngestError::ExtractionFailed(ExtractError::Io(e)))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.ingest(&UploadedDocument::new(bytes, filename)).await
    }

    async fn run(&self, doc: &UploadedDocument) -> Result<ExtractedText, IngestError> {
        self.check_size(doc.len() as u64)?;

        let sniffed = match sniff(&doc.bytes, &doc.filename) {
            Detection::Supported(sniffed) => sniffed,
            Detection::Unsupported { mime, .. } => {
                return Err(IngestError::InvalidFormat { mime });
            }
        };

        let raw = self
            .extractor_for(sniffed.format)
            .extract(&doc.bytes)
            .await
            .map_err(IngestError::ExtractionFailed)?;

        let text = raw.trim();
        let chars = text.chars().count();
        debug!(raw_chars = raw.len(), trimmed_chars = chars, "Checking extracted content");

        if chars < self.config.min_content_chars {
            return Err(IngestError::EmptyContent {
                chars,
                min: self.config.min_content_chars,
            });
        }

        Ok(
            ExtractedText::new(text.to_string(), doc.filename.clone(), sniffed.format)
                .with_mime(sniffed.mime)
                .with_byte_length(doc.len()),
        )
    }

    fn extractor_for(&self, format: DocumentFormat) -> &dyn Extractor {
        match format {
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Docx => &self.docx,
            DocumentFormat::PlainText => &self.text,
        }
    }
}
