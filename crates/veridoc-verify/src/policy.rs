//! Required-field verification policy.
//!
//! Each document type declares an ordered list of fields that must have been
//! extracted; a missing field contributes one fixed, human-readable failure
//! reason. Reason order always matches declaration order so reports are
//! deterministic.

use chrono::Utc;

use crate::types::{DocumentType, FieldSet, VerificationReport, VerificationStatus};

/// The reason recorded when classification found no matching marker.
pub const UNKNOWN_TYPE_REASON: &str = "Could not determine document type.";

struct RequiredField {
    field: &'static str,
    reason: &'static str,
}

const fn required(field: &'static str, reason: &'static str) -> RequiredField {
    RequiredField { field, reason }
}

/// Required fields per document type, checked in declaration order.
fn policy(doc_type: DocumentType) -> &'static [RequiredField] {
    const PAN: &[RequiredField] = &[
        required("Name", "Name not found."),
        required("PAN Number", "Valid PAN number not found."),
    ];
    const AADHAAR: &[RequiredField] = &[
        required("Name", "Name not found."),
        required("Aadhaar Number", "Valid Aadhaar number not found."),
    ];
    const CERTIFICATE: &[RequiredField] = &[
        required("Name", "Name not found."),
        required("Year of Passing", "Year of passing not found."),
    ];
    const FEE: &[RequiredField] = &[required("Total Fee", "Total fee amount not found.")];
    const INCOME: &[RequiredField] =
        &[required("Annual Income", "Valid income amount not found.")];
    const COLLATERAL: &[RequiredField] = &[required("Owner Name", "Owner name not found.")];

    match doc_type {
        DocumentType::PanCard => PAN,
        DocumentType::AadhaarCard => AADHAAR,
        DocumentType::TenthCertificate
        | DocumentType::TwelfthCertificate
        | DocumentType::UgCertificate => CERTIFICATE,
        DocumentType::CourseFeeStructure => FEE,
        DocumentType::IncomeProof => INCOME,
        DocumentType::CollateralDocument => COLLATERAL,
        DocumentType::Unknown => &[],
    }
}

/// Produces the final pass/fail report for an extracted field set.
#[derive(Default)]
pub struct VerificationEngine;

impl VerificationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Verify `fields` against the policy for `doc_type`.
    ///
    /// An `Unknown` type short-circuits: the report fails with exactly the
    /// classification reason and no field checks run.
    pub fn verify(&self, fields: FieldSet, doc_type: DocumentType) -> VerificationReport {
        let mut failure_reasons = Vec::new();

        if doc_type == DocumentType::Unknown {
            failure_reasons.push(UNKNOWN_TYPE_REASON.to_string());
        } else {
            for rule in policy(doc_type) {
                if !fields.is_found(rule.field) {
                    failure_reasons.push(rule.reason.to_string());
                }
            }
        }

        let status = if failure_reasons.is_empty() {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Failed
        };

        tracing::info!(
            doc_type = %doc_type,
            status = %status,
            reasons = failure_reasons.len(),
            "verification complete"
        );

        VerificationReport {
            doc_type,
            fields,
            status,
            failure_reasons,
            generated_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
