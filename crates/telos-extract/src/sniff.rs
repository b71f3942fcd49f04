//! Content-based format detection
//!
//! Classification looks at magic numbers first and only consults the
//! filename to settle the one real ambiguity: a DOCX is a ZIP container, and
//! a ZIP whose internal layout `infer` does not recognise as OOXML is still
//! treated as DOCX when the upload is named `*.docx`.

use serde::{Deserialize, Serialize};
use tracing::debug;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const ZIP_MIME: &str = "application/zip";

/// Formats the ingestion pipeline can extract text from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    pub fn mime(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => DOCX_MIME,
            DocumentFormat::PlainText => "text/plain",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::PlainText => "txt",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
            DocumentFormat::Docx => write!(f, "DOCX"),
            DocumentFormat::PlainText => write!(f, "plain text"),
        }
    }
}

/// A supported format together with the MIME type and extension detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniffedFormat {
    pub format: DocumentFormat,
    pub mime: String,
    pub extension: String,
}

impl SniffedFormat {
    fn of(format: DocumentFormat) -> Self {
        Self {
            format,
            mime: format.mime().to_string(),
            extension: format.extension().to_string(),
        }
    }
}

/// Outcome of sniffing a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// One of the formats we extract
    Supported(SniffedFormat),
    /// A recognised binary type we do not extract (image, executable, archive...)
    Unsupported { mime: String, extension: String },
}

impl Detection {
    pub fn mime(&self) -> &str {
        match self {
            Detection::Supported(sniffed) => &sniffed.mime,
            Detection::Unsupported { mime, .. } => mime,
        }
    }

    pub fn format(&self) -> Option<DocumentFormat> {
        match self {
            Detection::Supported(sniffed) => Some(sniffed.format),
            Detection::Unsupported { .. } => None,
        }
    }
}

/// Classify `bytes`, using `filename` only to resolve ZIP containers.
///
/// Never fails: content without a recognisable signature is plain text.
pub fn sniff(bytes: &[u8], filename: &str) -> Detection {
    let detection = match infer::get(bytes) {
        None => Detection::Supported(SniffedFormat::of(DocumentFormat::PlainText)),
        Some(kind) => classify(kind, filename),
    };

    debug!(
        filename = filename,
        mime = detection.mime(),
        format = ?detection.format(),
        "Sniffed upload"
    );

    detection
}

fn classify(kind: infer::Type, filename: &str) -> Detection {
    let mime = kind.mime_type();

    if mime == DocumentFormat::Pdf.mime() {
        return Detection::Supported(SniffedFormat::of(DocumentFormat::Pdf));
    }

    if mime == DOCX_MIME || (mime == ZIP_MIME && has_docx_extension(filename)) {
        return Detection::Supported(SniffedFormat::of(DocumentFormat::Docx));
    }

    // HTML, XML and shell scripts are text that happens to have a signature
    if kind.matcher_type() == infer::MatcherType::Text {
        return Detection::Supported(SniffedFormat {
            format: DocumentFormat::PlainText,
            mime: mime.to_string(),
            extension: kind.extension().to_string(),
        });
    }

    Detection::Unsupported {
        mime: mime.to_string(),
        extension: kind.extension().to_string(),
    }
}

fn has_docx_extension(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("docx"))
        .unwrap_or(false)
}
