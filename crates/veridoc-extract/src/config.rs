//! Extractor configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the extraction pipeline.
///
/// `min_text_chars` and the OCR timeout are deliberately configuration
/// rather than constants: the fallback threshold in particular is a
/// heuristic inherited from field observation, not a calibrated value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Minimum number of non-whitespace characters a PDF text layer must
    /// yield before it is trusted; below this the scanned-PDF OCR fallback
    /// kicks in.
    pub min_text_chars: usize,

    /// Upper bound for a single OCR call, in seconds. Rasterization and
    /// recognition cost grows with page count and resolution; exceeding the
    /// bound surfaces [`ExtractionError::Timeout`](crate::ExtractionError::Timeout)
    /// instead of hanging the caller.
    pub ocr_timeout_secs: u64,

    /// Tesseract language code.
    pub ocr_language: String,

    /// Target pixel width when rasterizing PDF pages for OCR.
    pub raster_target_width: i32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_text_chars: 10,
            ocr_timeout_secs: 120,
            ocr_language: "eng".into(),
            raster_target_width: 2480,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
