//! Extraction error types.

use veridoc_vault::VaultError;

/// Unified error type for text extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The file is missing or unreadable.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The container is neither a supported image, a PDF, nor plain text.
    #[error("unsupported document format")]
    UnsupportedFormat,

    /// The image bytes could not be decoded into pixels.
    #[error("image decode failed: {0}")]
    ImageDecode(String),

    /// The PDF could not be parsed.
    #[error("pdf parse failed: {0}")]
    PdfParse(String),

    /// A PDF page could not be rendered for OCR.
    #[error("pdf render failed on page {page}: {reason}")]
    PdfRender { page: usize, reason: String },

    /// The OCR engine failed or is unavailable.
    #[error("ocr failed: {0}")]
    Ocr(String),

    /// An OCR call exceeded the configured bound.
    #[error("ocr timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// A plain-text document was not valid UTF-8.
    #[error("text encoding error: {0}")]
    Encoding(String),

    /// Error from the at-rest encryption layer (missing key, wrong key,
    /// corrupted envelope).
    #[error("vault error: {0}")]
    Vault(#[from] VaultError),
}

/// Convenience alias used throughout the extraction crate.
pub type Result<T> = std::result::Result<T, ExtractionError>;
