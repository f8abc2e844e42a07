//! Document type classification.
//!
//! Classification is an ordered sequence of case-insensitive marker checks:
//! the marker table below is scanned in one pass with an [`aho_corasick`]
//! automaton, and the matching rule with the lowest table index wins. Table
//! order is load-bearing — the most authoritative markers come first, and
//! "12th" markers precede "10th" so neither shadows the other via the
//! generic year substrings.

use aho_corasick::AhoCorasick;

use crate::error::{Result, VerifyError};
use crate::types::DocumentType;

/// Ordered marker table. The first entry whose marker occurs anywhere in the
/// text decides the type.
///
/// The PAN and Aadhaar markers, and their relative priority, mirror the
/// issuing authorities' own wording on the physical cards.
const MARKERS: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::PanCard,
        &["income tax department", "permanent account number"],
    ),
    (
        DocumentType::AadhaarCard,
        &["aadhaar", "unique identification authority"],
    ),
    (
        DocumentType::TwelfthCertificate,
        &["higher secondary", "senior secondary", "class xii", "12th"],
    ),
    (
        DocumentType::TenthCertificate,
        &["secondary school certificate", "class x", "10th"],
    ),
    (
        DocumentType::UgCertificate,
        &["bachelor of", "degree of", "convocation"],
    ),
    (
        DocumentType::CourseFeeStructure,
        &["fee structure", "tuition fee", "semester fee"],
    ),
    (
        DocumentType::IncomeProof,
        &["income certificate", "salary slip", "form 16", "annual income"],
    ),
    (
        DocumentType::CollateralDocument,
        &["collateral", "mortgage", "property deed"],
    ),
];

/// Infers a [`DocumentType`] from extracted text.
pub struct DocumentClassifier {
    automaton: AhoCorasick,
    /// Document type per automaton pattern index, parallel to the flattened
    /// marker list.
    pattern_types: Vec<DocumentType>,
}

impl DocumentClassifier {
    /// Build the classifier from the fixed marker table.
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::new();
        let mut pattern_types = Vec::new();
        for (doc_type, markers) in MARKERS {
            for marker in *markers {
                patterns.push(*marker);
                pattern_types.push(*doc_type);
            }
        }

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .map_err(|e| VerifyError::AutomatonBuild {
                reason: e.to_string(),
            })?;

        Ok(Self {
            automaton,
            pattern_types,
        })
    }

    /// Classify `text`, returning [`DocumentType::Unknown`] when no marker
    /// matches.
    ///
    /// Deterministic and stateless: the same text always yields the same
    /// type regardless of call order.
    pub fn classify(&self, text: &str) -> DocumentType {
        // All matches are collected and the lowest *table* index wins, so
        // marker position within the text never affects priority.
        let mut best: Option<usize> = None;
        for mat in self.automaton.find_overlapping_iter(text) {
            let idx = mat.pattern().as_usize();
            if best.is_none_or(|b| idx < b) {
                best = Some(idx);
            }
        }

        match best {
            Some(idx) => {
                let doc_type = self.pattern_types[idx];
                tracing::debug!(doc_type = %doc_type, "document classified");
                doc_type
            }
            None => {
                tracing::debug!("no marker matched — could not determine document type");
                DocumentType::Unknown
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
