//! Upload and extraction result types

use crate::sniff::DocumentFormat;
use serde::{Deserialize, Serialize};

/// A file as received from the upload handler.
///
/// `declared_content_type` comes from the client and is kept for logging
/// only; classification always looks at the bytes.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub declared_content_type: Option<String>,
}

impl UploadedDocument {
    pub fn new(bytes: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
            declared_content_type: None,
        }
    }

    /// Record the content type the client claimed
    pub fn with_declared_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.declared_content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Text pulled out of an upload, with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedText {
    /// Extracted text, trimmed
    pub text: String,

    /// Name the file was uploaded under
    pub filename: String,

    /// MIME type resolved from the content
    pub mime: String,

    /// Format whose extractor produced the text
    pub format: DocumentFormat,

    /// Size of the upload in bytes
    pub byte_length: usize,

    /// Length of `text` in characters
    pub char_count: usize,
}

impl ExtractedText {
    /// Create a new extraction result
    pub fn new(text: String, filename: impl Into<String>, format: DocumentFormat) -> Self {
        let char_count = text.chars().count();
        Self {
            text,
            filename: filename.into(),
            mime: format.mime().to_string(),
            format,
            byte_length: 0,
            char_count,
        }
    }

    /// Set the resolved MIME type
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    /// Set the original upload size
    pub fn with_byte_length(mut self, length: usize) -> Self {
        self.byte_length = length;
        self
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_is_not_byte_count() {
        let text = ExtractedText::new("naïve café".to_string(), "a.txt", DocumentFormat::PlainText);
        assert_eq!(text.char_count, 10);
        assert_eq!(text.mime, "text/plain");
    }

    #[test]
    fn test_upload_builder() {
        let doc = UploadedDocument::new(b"hi".to_vec(), "x.txt")
            .with_declared_content_type("application/pdf");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.declared_content_type.as_deref(), Some("application/pdf"));
    }
}
