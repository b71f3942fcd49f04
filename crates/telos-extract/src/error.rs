//! Error types for document ingestion
//!
//! Two layers: [`ExtractError`] is what an individual extractor reports and
//! may carry library detail; [`IngestError`] is the closed set of outcomes
//! callers see. Detail from the first layer is logged server-side and never
//! reaches a user-facing message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for extractor operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors raised while turning a buffer into text
#[derive(Error, Debug)]
pub enum ExtractError {
    /// PDF structure could not be parsed
    #[error("PDF error: {0}")]
    Pdf(String),

    /// DOCX container or body could not be read
    #[error("DOCX error: {0}")]
    Docx(String),

    /// The parser panicked on malformed input
    #[error("parser panicked: {0}")]
    Panicked(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for ExtractError {
    fn from(err: lopdf::Error) -> Self {
        ExtractError::Pdf(err.to_string())
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        ExtractError::Docx(err.to_string())
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        ExtractError::Docx(err.to_string())
    }
}

/// Fallback message for error codes this build does not know
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to process file. Please try again.";

/// Ingestion failures exposed to callers
#[derive(Error, Debug)]
pub enum IngestError {
    /// Upload is larger than the configured ceiling
    #[error("file too large: {size} bytes exceeds max {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    /// Content is a recognised format this engine does not extract
    #[error("unsupported format: {mime}")]
    InvalidFormat { mime: String },

    /// The extractor for a supported format failed
    #[error("extraction failed: {0}")]
    ExtractionFailed(#[source] ExtractError),

    /// Extracted text is shorter than the configured minimum
    #[error("extracted text too short: {chars} characters, need {min}")]
    EmptyContent { chars: usize, min: usize },
}

/// Discriminant of [`IngestError`], as carried over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngestErrorKind {
    FileTooLarge,
    InvalidFormat,
    ExtractionFailed,
    EmptyContent,
}

impl IngestErrorKind {
    /// Every kind, in check order
    pub const ALL: [IngestErrorKind; 4] = [
        IngestErrorKind::FileTooLarge,
        IngestErrorKind::InvalidFormat,
        IngestErrorKind::ExtractionFailed,
        IngestErrorKind::EmptyContent,
    ];

    pub fn code(self) -> &'static str {
        match self {
            IngestErrorKind::FileTooLarge => "FILE_TOO_LARGE",
            IngestErrorKind::InvalidFormat => "INVALID_FORMAT",
            IngestErrorKind::ExtractionFailed => "EXTRACTION_FAILED",
            IngestErrorKind::EmptyContent => "EMPTY_CONTENT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Fixed, non-technical message for end users
    pub fn user_message(self) -> &'static str {
        match self {
            IngestErrorKind::FileTooLarge => "File is too large. Maximum size is 5MB.",
            IngestErrorKind::InvalidFormat => {
                "Invalid file type. Please upload a PDF, DOCX, or TXT file."
            }
            IngestErrorKind::ExtractionFailed => {
                "Could not read file. Please try a different format."
            }
            IngestErrorKind::EmptyContent => {
                "File appears to be empty or contains too little text."
            }
        }
    }

    /// HTTP status for the upload handler; every kind is a client error
    pub fn status_code(self) -> u16 {
        400
    }
}

impl std::fmt::Display for IngestErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl IngestError {
    pub fn kind(&self) -> IngestErrorKind {
        match self {
            IngestError::FileTooLarge { .. } => IngestErrorKind::FileTooLarge,
            IngestError::InvalidFormat { .. } => IngestErrorKind::InvalidFormat,
            IngestError::ExtractionFailed(_) => IngestErrorKind::ExtractionFailed,
            IngestError::EmptyContent { .. } => IngestErrorKind::EmptyContent,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

/// Message for a serialised error code, with a generic fallback for codes
/// introduced after this build.
pub fn user_message_for_code(code: &str) -> &'static str {
    IngestErrorKind::from_code(code)
        .map(IngestErrorKind::user_message)
        .unwrap_or(GENERIC_FAILURE_MESSAGE)
}
