//! PDF text-layer extraction using `lopdf`.

use lopdf::Document;

use crate::error::{ExtractionError, Result};

/// Extracts the embedded text layer of a PDF, page by page.
pub trait PdfTextSource: Send + Sync {
    /// The text of each page, in page order. A page with no text layer
    /// yields an empty string so page numbering stays aligned.
    fn page_texts(&self, pdf: &[u8]) -> Result<Vec<String>>;

    /// Number of pages in the document.
    fn page_count(&self, pdf: &[u8]) -> Result<usize>;
}

/// `lopdf`-backed text source.
#[derive(Default)]
pub struct LopdfText;

impl LopdfText {
    pub fn new() -> Self {
        Self
    }
}

impl PdfTextSource for LopdfText {
    fn page_texts(&self, pdf: &[u8]) -> Result<Vec<String>> {
        let doc = Document::load_mem(pdf)
            .map_err(|e| ExtractionError::PdfParse(e.to_string()))?;

        let pages = doc.get_pages();
        let mut page_numbers: Vec<u32> = pages.keys().copied().collect();
        page_numbers.sort_unstable();

        let mut texts = Vec::with_capacity(page_numbers.len());
        for page_num in page_numbers {
            // Scanned pages have no text layer; keep them as empty strings
            // rather than dropping them so the fallback sees every page.
            let text = doc
                .extract_text(&[page_num])
                .map(|t| t.trim().to_string())
                .unwrap_or_default();
            texts.push(text);
        }

        tracing::debug!(
            pages = texts.len(),
            chars = texts.iter().map(String::len).sum::<usize>(),
            "extracted pdf text layer"
        );

        Ok(texts)
    }

    fn page_count(&self, pdf: &[u8]) -> Result<usize> {
        let doc = Document::load_mem(pdf)
            .map_err(|e| ExtractionError::PdfParse(e.to_string()))?;
        Ok(doc.get_pages().len())
    }
}

// ---------------------------------------------------------------------------
// Mock
// ---------------------------------------------------------------------------

/// Scripted text source for tests.
pub struct MockPdfText {
    pages: Vec<String>,
}

impl MockPdfText {
    /// A source that reports the given page texts for any input.
    pub fn with_pages<S: Into<String>>(pages: Vec<S>) -> Self {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }
}

impl PdfTextSource for MockPdfText {
    fn page_texts(&self, _pdf: &[u8]) -> Result<Vec<String>> {
        Ok(self.pages.clone())
    }

    fn page_count(&self, _pdf: &[u8]) -> Result<usize> {
        Ok(self.pages.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bytes_fail_to_parse() {
        let source = LopdfText::new();
        let result = source.page_texts(b"not a pdf at all");
        assert!(matches!(result, Err(ExtractionError::PdfParse(_))));
    }

    #[test]
    fn mock_reports_scripted_pages() {
        let source = MockPdfText::with_pages(vec!["page one", "page two"]);
        assert_eq!(source.page_count(b"ignored").unwrap(), 2);
        assert_eq!(
            source.page_texts(b"ignored").unwrap(),
            vec!["page one", "page two"]
        );
    }
}
