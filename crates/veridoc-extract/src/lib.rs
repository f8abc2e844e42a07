//! Text extraction for the veridoc document intake pipeline.
//!
//! Turns a document file — image, digital PDF, or scanned PDF — into a plain
//! string of extracted text. Three strategies, selected by container
//! inspection rather than by trial and error:
//!
//! - **Image**: OCR directly on the pixel data.
//! - **Digital PDF**: the embedded text layer, fast and exact.
//! - **Scanned PDF**: when the text layer is near-empty, each page is
//!   rasterized and OCRed, page order preserved.
//!
//! Files that are at rest encrypted (see [`veridoc_vault`]) are decrypted to
//! a transient buffer; the on-disk bytes are never rewritten by extraction,
//! so the file's encryption state is an unchanged postcondition regardless of
//! success or failure.
//!
//! The OCR engine, PDF text source, and rasterizer are trait objects so
//! tests (and callers without a Tesseract or Pdfium install) can substitute
//! mocks.

pub mod config;
pub mod error;
pub mod extractor;
pub mod format;
pub mod ocr;
pub mod pdf;
pub mod raster;

// Re-export the most commonly used types at the crate root for convenience.
pub use config::ExtractorConfig;
pub use error::{ExtractionError, Result};
pub use extractor::DocumentExtractor;
pub use format::FileKind;
pub use ocr::{MockOcrEngine, OcrEngine, TesseractOcr};
pub use pdf::{LopdfText, MockPdfText, PdfTextSource};
pub use raster::{MockRasterizer, PdfRasterizer, PdfiumRasterizer};
