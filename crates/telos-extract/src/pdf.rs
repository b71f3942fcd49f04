//! PDF document text extraction

use crate::{
    error::{ExtractError, Result},
    sniff::DocumentFormat,
    Extractor,
};
use lopdf::Document;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Separator between pages, kept so page boundaries survive in the text
const PAGE_SEPARATOR: &str = "\n\n";

/// PDF document text extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from PDF bytes.
    ///
    /// Each page becomes one line of space-separated text: every whitespace
    /// run, including runs inside a single text item, collapses to one
    /// space. Pages are joined by a blank line. A page with nothing decodable (a scanned image, an
    /// unsupported font encoding) contributes an empty string instead of
    /// failing the document.
    pub fn extract_from_bytes(&self, bytes: &[u8]) -> Result<String> {
        // lopdf can panic on some malformed cross-reference tables
        panic::catch_unwind(AssertUnwindSafe(|| self.extract_pages(bytes)))
            .unwrap_or_else(|payload| Err(ExtractError::Panicked(panic_message(payload))))
    }

    fn extract_pages(&self, bytes: &[u8]) -> Result<String> {
        let doc = Document::load_mem(bytes)?;
        let pages = doc.get_pages();

        if pages.is_empty() {
            return Err(ExtractError::Pdf("document has no pages".to_string()));
        }

        let texts: Vec<String> = pages
            .keys()
            .map(|&page_num| match doc.extract_text(&[page_num]) {
                Ok(raw) => normalize_page(&raw),
                Err(e) => {
                    debug!(page = page_num, error = %e, "No extractable text on page");
                    String::new()
                }
            })
            .collect();

        debug!(page_count = pages.len(), "Extracted PDF text");
        Ok(texts.join(PAGE_SEPARATOR))
    }
}

/// Collapse a page's text items into a single space-separated line
fn normalize_page(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[async_trait::async_trait]
impl Extractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    async fn extract(&self, bytes: &[u8]) -> Result<String> {
        self.extract_from_bytes(bytes)
    }
}
