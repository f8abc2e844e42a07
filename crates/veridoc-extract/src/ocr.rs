//! OCR engine abstraction.
//!
//! Production recognition goes through Tesseract via the `rusty-tesseract`
//! CLI binding; [`MockOcrEngine`] exists so the orchestration logic can be
//! tested without a Tesseract install.

use image::DynamicImage;

use crate::error::{ExtractionError, Result};

/// Converts pixel data into text.
///
/// Implementations must be `Send + Sync`: the engine is shared with the
/// worker thread that enforces the OCR timeout.
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in `image`.
    fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

// ---------------------------------------------------------------------------
// Tesseract
// ---------------------------------------------------------------------------

/// Tesseract-backed OCR engine.
pub struct TesseractOcr {
    /// Tesseract language code (e.g. "eng").
    language: String,
}

impl TesseractOcr {
    /// Create an engine for the given language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let img = rusty_tesseract::Image::from_dynamic_image(image)
            .map_err(|e| ExtractionError::Ocr(e.to_string()))?;

        let args = rusty_tesseract::Args {
            lang: self.language.clone(),
            ..rusty_tesseract::Args::default()
        };

        let text = rusty_tesseract::image_to_string(&img, &args)
            .map_err(|e| ExtractionError::Ocr(e.to_string()))?;

        tracing::debug!(
            lang = %self.language,
            chars = text.len(),
            "tesseract recognition complete"
        );

        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Mock
// ---------------------------------------------------------------------------

/// Scripted OCR engine for tests and Tesseract-less environments.
pub struct MockOcrEngine {
    text: String,
    delay: Option<std::time::Duration>,
}

impl MockOcrEngine {
    /// An engine that returns `text` for every image.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay: None,
        }
    }

    /// Sleep for `delay` before answering — used to exercise the timeout
    /// path.
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl OcrEngine for MockOcrEngine {
    fn recognize(&self, _image: &DynamicImage) -> Result<String> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        Ok(self.text.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
