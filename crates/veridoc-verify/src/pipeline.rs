//! Classify → extract → verify, as one call.

use crate::classifier::DocumentClassifier;
use crate::config::EngineConfig;
use crate::engine::FieldExtractionEngine;
use crate::error::Result;
use crate::policy::VerificationEngine;
use crate::types::VerificationReport;

/// Bundles the classifier, extraction engine, and verification policy into
/// the single entry point callers use on extracted text.
pub struct DocumentVerifier {
    classifier: DocumentClassifier,
    extraction: FieldExtractionEngine,
    verification: VerificationEngine,
}

impl DocumentVerifier {
    /// Build all engines. Fails only if a rule table fails to compile.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            classifier: DocumentClassifier::new()?,
            extraction: FieldExtractionEngine::new(config)?,
            verification: VerificationEngine::new(),
        })
    }

    /// Run the full verification pipeline over already-extracted text.
    pub fn verify_text(&self, text: &str) -> VerificationReport {
        let doc_type = self.classifier.classify(text);
        let fields = self.extraction.extract(text, doc_type);
        self.verification.verify(fields, doc_type)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocumentType, VerificationStatus};

    #[test]
    fn full_pipeline_on_pan_text() {
        let verifier = DocumentVerifier::new(&EngineConfig::default()).unwrap();
        let report =
            verifier.verify_text("INCOME TAX DEPARTMENT\nName: Jane Doe\nABCDE1234F");

        assert_eq!(report.doc_type, DocumentType::PanCard);
        assert_eq!(report.status, VerificationStatus::Verified);
    }
}
