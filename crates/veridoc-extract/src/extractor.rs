//! Extraction orchestrator.
//!
//! Ties the container sniffing, the OCR engine, the PDF text source, and the
//! rasterizer together into the one call the rest of the pipeline uses:
//! path in, extracted text out.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;

use veridoc_vault::crypto::EncryptionKey;
use veridoc_vault::file::read_decrypted;

use crate::config::ExtractorConfig;
use crate::error::{ExtractionError, Result};
use crate::format::{self, FileKind};
use crate::ocr::{OcrEngine, TesseractOcr};
use crate::pdf::{LopdfText, PdfTextSource};
use crate::raster::{PdfRasterizer, PdfiumRasterizer};

/// Extracts plain text from a document file.
///
/// The three strategy seams are trait objects, enabling dependency
/// injection; [`DocumentExtractor::with_defaults`] wires up the production
/// Tesseract/lopdf/Pdfium implementations.
pub struct DocumentExtractor {
    // Shared with the timeout worker thread, hence Arc rather than Box.
    ocr: Arc<dyn OcrEngine>,
    pdf: Box<dyn PdfTextSource>,
    rasterizer: Box<dyn PdfRasterizer>,
    key: Option<EncryptionKey>,
    config: ExtractorConfig,
}

impl DocumentExtractor {
    /// Create an extractor from explicit strategy implementations.
    pub fn new(
        ocr: Arc<dyn OcrEngine>,
        pdf: Box<dyn PdfTextSource>,
        rasterizer: Box<dyn PdfRasterizer>,
        config: ExtractorConfig,
    ) -> Self {
        Self {
            ocr,
            pdf,
            rasterizer,
            key: None,
            config,
        }
    }

    /// Create an extractor with the production engines.
    pub fn with_defaults(config: ExtractorConfig) -> Self {
        let ocr = Arc::new(TesseractOcr::new(config.ocr_language.clone()));
        let pdf = Box::new(LopdfText::new());
        let rasterizer = Box::new(PdfiumRasterizer::new(config.raster_target_width));
        Self::new(ocr, pdf, rasterizer, config)
    }

    /// Provide the deployment key so at-rest-encrypted files can be read
    /// transparently.
    pub fn with_key(mut self, key: EncryptionKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Extract the text of the document at `path`.
    ///
    /// Encrypted files are decrypted to a transient buffer; the bytes on
    /// disk are never rewritten, so the file's at-rest state is unchanged on
    /// both success and failure.
    pub fn extract(&self, path: &Path) -> Result<String> {
        tracing::info!(path = %path.display(), "starting text extraction");

        let bytes = read_decrypted(path, self.key.as_ref())?;
        let kind = format::detect(&bytes);

        let text = match kind {
            FileKind::Image => self.extract_image(&bytes)?,
            FileKind::Pdf => self.extract_pdf(&bytes)?,
            FileKind::PlainText => String::from_utf8(bytes)
                .map_err(|e| ExtractionError::Encoding(e.to_string()))?,
            FileKind::Unknown => return Err(ExtractionError::UnsupportedFormat),
        };

        tracing::info!(
            path = %path.display(),
            kind = kind.as_str(),
            chars = text.len(),
            "text extraction complete"
        );

        Ok(text)
    }

    // -- Strategies ---------------------------------------------------------

    /// Image strategy: OCR directly on the pixel data.
    fn extract_image(&self, bytes: &[u8]) -> Result<String> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| ExtractionError::ImageDecode(e.to_string()))?;
        self.run_ocr(image)
    }

    /// Digital-PDF strategy with scanned-PDF fallback.
    ///
    /// The embedded text layer is used when it yields enough non-whitespace
    /// characters; otherwise every page is rasterized and OCRed in page
    /// order.
    fn extract_pdf(&self, bytes: &[u8]) -> Result<String> {
        let pages = self.pdf.page_texts(bytes)?;
        let direct = pages.join("\n\n");

        let direct_chars = non_whitespace_len(&direct);
        if direct_chars >= self.config.min_text_chars {
            tracing::debug!(pages = pages.len(), chars = direct_chars, "using pdf text layer");
            return Ok(direct);
        }

        tracing::info!(
            chars = direct_chars,
            threshold = self.config.min_text_chars,
            "pdf text layer below threshold — falling back to per-page ocr"
        );

        let images = self.rasterizer.render_pages(bytes)?;
        let mut texts = Vec::with_capacity(images.len());
        for image in images {
            texts.push(self.run_ocr(image)?);
        }

        Ok(texts.join("\n\n"))
    }

    // -- OCR with bounded time ----------------------------------------------

    /// Run one OCR call under the configured timeout.
    ///
    /// A timed-out recognition keeps running on its detached worker thread
    /// until the engine finishes; its result is discarded.
    fn run_ocr(&self, image: DynamicImage) -> Result<String> {
        let timeout = Duration::from_secs(self.config.ocr_timeout_secs);

        let (tx, rx) = crossbeam::channel::bounded(1);
        let ocr = Arc::clone(&self.ocr);
        std::thread::spawn(move || {
            let _ = tx.send(ocr.recognize(&image));
        });

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.config.ocr_timeout_secs,
                    "ocr call exceeded time bound"
                );
                Err(ExtractionError::Timeout {
                    seconds: self.config.ocr_timeout_secs,
                })
            }
        }
    }
}

/// Count the characters that are not whitespace.
fn non_whitespace_len(s: &str) -> usize {
    s.chars().filter(|c| !c.is_whitespace()).count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
