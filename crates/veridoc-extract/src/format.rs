//! Container sniffing.
//!
//! The extraction strategy is chosen by inspecting the (decrypted) bytes,
//! never by file extension and never by catching a failed parse.

/// The document container kinds the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// PNG, JPEG, TIFF, or BMP pixel data — OCR directly.
    Image,
    /// A PDF container; may be digital or scanned.
    Pdf,
    /// UTF-8 text, used as-is.
    PlainText,
    /// Anything else.
    Unknown,
}

impl FileKind {
    /// Short name for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::PlainText => "plain-text",
            Self::Unknown => "unknown",
        }
    }
}

/// Sniff the container kind from the leading bytes.
pub fn detect(bytes: &[u8]) -> FileKind {
    if bytes.starts_with(b"%PDF-") {
        return FileKind::Pdf;
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G'])
        || bytes.starts_with(&[0xFF, 0xD8, 0xFF])
        || bytes.starts_with(b"II*\x00")
        || bytes.starts_with(b"MM\x00*")
        || bytes.starts_with(b"BM")
    {
        return FileKind::Image;
    }
    if !bytes.is_empty() && std::str::from_utf8(bytes).is_ok() {
        return FileKind::PlainText;
    }
    FileKind::Unknown
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pdf_magic() {
        assert_eq!(detect(b"%PDF-1.7 rest of file"), FileKind::Pdf);
    }

    #[test]
    fn detects_image_magics() {
        assert_eq!(detect(&[0x89, b'P', b'N', b'G', 13, 10]), FileKind::Image);
        assert_eq!(detect(&[0xFF, 0xD8, 0xFF, 0xE0]), FileKind::Image);
        assert_eq!(detect(b"II*\x00rest"), FileKind::Image);
        assert_eq!(detect(b"MM\x00*rest"), FileKind::Image);
        assert_eq!(detect(b"BMxxxx"), FileKind::Image);
    }

    #[test]
    fn utf8_is_plain_text() {
        assert_eq!(detect(b"Name: Jane Doe"), FileKind::PlainText);
    }

    #[test]
    fn binary_garbage_is_unknown() {
        assert_eq!(detect(&[0x00, 0xFF, 0xFE, 0x01]), FileKind::Unknown);
        assert_eq!(detect(b""), FileKind::Unknown);
    }
}
