//! PDF page rasterization for the scanned-PDF OCR fallback.

use image::DynamicImage;
use pdfium_render::prelude::*;

use crate::error::{ExtractionError, Result};

/// Renders each page of a PDF to an image suitable for OCR.
pub trait PdfRasterizer: Send + Sync {
    /// Render every page, in page order.
    fn render_pages(&self, pdf: &[u8]) -> Result<Vec<DynamicImage>>;
}

/// Pdfium-backed rasterizer.
///
/// Binds to the system Pdfium library at call time, so constructing the
/// rasterizer is cheap and environments without Pdfium only fail when the
/// fallback is actually needed.
pub struct PdfiumRasterizer {
    /// Target pixel width per rendered page.
    target_width: i32,
}

impl PdfiumRasterizer {
    pub fn new(target_width: i32) -> Self {
        Self { target_width }
    }
}

impl PdfRasterizer for PdfiumRasterizer {
    fn render_pages(&self, pdf: &[u8]) -> Result<Vec<DynamicImage>> {
        let bindings = Pdfium::bind_to_system_library().map_err(|e| ExtractionError::PdfRender {
            page: 0,
            reason: format!("pdfium unavailable: {e}"),
        })?;
        let pdfium = Pdfium::new(bindings);

        let document = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| ExtractionError::PdfParse(e.to_string()))?;

        let render_config = PdfRenderConfig::new().set_target_width(self.target_width);

        let mut images = Vec::new();
        for (idx, page) in document.pages().iter().enumerate() {
            let bitmap =
                page.render_with_config(&render_config)
                    .map_err(|e| ExtractionError::PdfRender {
                        page: idx + 1,
                        reason: e.to_string(),
                    })?;
            images.push(bitmap.as_image());
        }

        tracing::debug!(
            pages = images.len(),
            width = self.target_width,
            "rasterized pdf pages for ocr"
        );

        Ok(images)
    }
}

// ---------------------------------------------------------------------------
// Mock
// ---------------------------------------------------------------------------

/// Rasterizer that yields blank pages, for tests.
pub struct MockRasterizer {
    page_count: usize,
}

impl MockRasterizer {
    pub fn with_page_count(page_count: usize) -> Self {
        Self { page_count }
    }
}

impl PdfRasterizer for MockRasterizer {
    fn render_pages(&self, _pdf: &[u8]) -> Result<Vec<DynamicImage>> {
        Ok((0..self.page_count)
            .map(|_| DynamicImage::new_rgb8(1, 1))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
