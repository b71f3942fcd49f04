//! Plain-text decoding

use crate::{error::Result, sniff::DocumentFormat, Extractor};

/// Decodes uploads as UTF-8, substituting U+FFFD for invalid sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Decode a buffer; a leading byte-order mark is dropped.
    pub fn extract_from_bytes(&self, bytes: &[u8]) -> String {
        let decoded = String::from_utf8_lossy(bytes);
        match decoded.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => decoded.into_owned(),
        }
    }
}

#[async_trait::async_trait]
impl Extractor for TextExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::PlainText
    }

    async fn extract(&self, bytes: &[u8]) -> Result<String> {
        Ok(self.extract_from_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8() {
        let text = TextExtractor::new().extract_from_bytes("Grüße aus Köln".as_bytes());
        assert_eq!(text, "Grüße aus Köln");
    }

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let text = TextExtractor::new().extract_from_bytes(b"abc\xff\xfedef");
        assert!(text.starts_with("abc"));
        assert!(text.ends_with("def"));
        assert!(text.contains('\u{fffd}'));
    }

    #[test]
    fn test_bom_dropped() {
        let text = TextExtractor::new().extract_from_bytes(b"\xef\xbb\xbfhello");
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_trait_never_fails() {
        let extractor = TextExtractor::new();
        assert_eq!(extractor.extract(b"").await.unwrap(), "");
        assert_eq!(extractor.format(), DocumentFormat::PlainText);
    }
}
