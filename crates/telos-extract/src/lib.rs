//! # TELOS Extract
//!
//! Turns uploaded documents into plain text that is safe to hand to an LLM.
//!
//! - **Sniffing**: classify uploads by content, never by declared type
//! - **Extraction**: PDF pages, DOCX paragraphs, lossy UTF-8 text
//! - **Ingestion checks**: size ceiling, supported formats, minimum content,
//!   with one closed error taxonomy for callers
//! - **Sanitization**: PII scrubbing and a findings summary via `telos-guard`
//!
//! ## Example
//!
//! ```rust,ignore
//! use telos_extract::{Ingestor, IngestConfig, UploadedDocument};
//!
//! #[tokio::main]
//! async fn main() {
//!     let ingestor = Ingestor::new(IngestConfig::default());
//!     let upload = UploadedDocument::new(std::fs::read("cv.pdf").unwrap(), "cv.pdf");
//!     match ingestor.ingest(&upload).await {
//!         Ok(extracted) => println!("{} characters", extracted.char_count),
//!         Err(e) => eprintln!("{}", e.user_message()),
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────┐   ┌───────────┐   ┌─────────┐   ┌──────────────┐
//! │  Upload  │──►│  Size   │──►│  Sniffer  │──►│Extractor│──►│ Content check│
//! │ (bytes)  │   │  gate   │   │ (infer)   │   │PDF/DOCX/│   │ (≥ 50 chars) │
//! └──────────┘   └─────────┘   └───────────┘   │  text   │   └──────┬───────┘
//!                                              └─────────┘          │
//!                                                                   ▼
//!                                   ┌─────────────────┐    ┌─────────────────┐
//!                                   │ Cleaned text +  │◄───│  TELOS Guard    │
//!                                   │ findings summary│    │  (PII scrub)    │
//!                                   └─────────────────┘    └─────────────────┘
//! ```

pub mod config;
pub mod docx;
pub mod error;
pub mod ingest;
pub mod pdf;
pub mod result;
pub mod sniff;
pub mod text;

#[cfg(feature = "sanitize")]
pub mod sanitize;

pub use config::{IngestConfig, PipelineConfig};
pub use docx::DocxExtractor;
pub use error::{ExtractError, IngestError, IngestErrorKind, Result};
pub use ingest::Ingestor;
pub use pdf::PdfExtractor;
pub use result::{ExtractedText, UploadedDocument};
pub use sniff::{sniff, Detection, DocumentFormat, SniffedFormat};
pub use text::TextExtractor;

#[cfg(feature = "sanitize")]
pub use sanitize::{Pipeline, ScrubbedDocument};

/// Common trait for all extractors
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Format this extractor reads
    fn format(&self) -> DocumentFormat;

    /// Turn a buffer into a single UTF-8 string
    async fn extract(&self, bytes: &[u8]) -> Result<String>;
}
