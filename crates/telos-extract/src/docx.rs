//! DOCX paragraph text extraction
//!
//! Reads `word/document.xml` out of the container and keeps the text of each
//! `w:p` paragraph. Runs are concatenated, tabs and breaks become `\t` and
//! `\n`, and everything else (styles, headers, images) is ignored.

use crate::{
    error::{ExtractError, Result},
    sniff::DocumentFormat,
    Extractor,
};
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use tracing::debug;

const DOCUMENT_PART: &str = "word/document.xml";

/// Ceiling on the uncompressed document part; a 5 MiB upload that inflates
/// past this is treated as unreadable.
const MAX_DOCUMENT_PART_BYTES: u64 = 64 * 1024 * 1024;

/// DOCX text extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract paragraph text from DOCX bytes; each paragraph is followed by
    /// a blank line.
    pub fn extract_from_bytes(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        let mut entry = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => {
                ExtractError::Docx(format!("missing {}", DOCUMENT_PART))
            }
            other => other.into(),
        })?;

        if entry.size() > MAX_DOCUMENT_PART_BYTES {
            return Err(ExtractError::Docx(format!(
                "{} inflates to {} bytes",
                DOCUMENT_PART,
                entry.size()
            )));
        }

        let mut xml = String::new();
        entry
            .by_ref()
            .take(MAX_DOCUMENT_PART_BYTES)
            .read_to_string(&mut xml)?;

        let paragraphs = parse_paragraphs(&xml)?;
        debug!(paragraphs = paragraphs.len(), "Extracted DOCX text");

        Ok(paragraphs
            .iter()
            .map(|p| format!("{}\n\n", p))
            .collect())
    }
}

/// Collect the text of every top-level paragraph, empty ones included.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => depth += 1,
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" if depth == 0 => paragraphs.push(String::new()),
                b"w:tab" if depth > 0 => current.push('\t'),
                b"w:br" | b"w:cr" if depth > 0 => current.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|err| ExtractError::Docx(err.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

#[async_trait::async_trait]
impl Extractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    async fn extract(&self, bytes: &[u8]) -> Result<String> {
        self.extract_from_bytes(bytes)
    }
}
