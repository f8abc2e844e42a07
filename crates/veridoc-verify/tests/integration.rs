//! Integration tests for the veridoc-verify crate.
//!
//! End-to-end scenarios over extracted text: classification, field
//! extraction, and the final pass/fail report.

use veridoc_verify::{
    DocumentType, DocumentVerifier, EngineConfig, FieldValue, VerificationStatus,
};

fn verifier() -> DocumentVerifier {
    DocumentVerifier::new(&EngineConfig::default()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
//  End-to-end scenarios
// ═══════════════════════════════════════════════════════════════════════

/// A complete PAN card verifies.
#[test]
fn pan_card_with_all_fields_verifies() {
    let report = verifier().verify_text(
        "INCOME TAX DEPARTMENT\nGOVT. OF INDIA\nName: Jane Doe\n\
         Date of Birth 14/08/1998\nABCDE1234F",
    );

    assert_eq!(report.doc_type, DocumentType::PanCard);
    assert_eq!(report.status, VerificationStatus::Verified);
    assert!(report.failure_reasons.is_empty());
    assert_eq!(report.fields.get("Name").unwrap().as_str(), "Jane Doe");
    assert_eq!(report.fields.get("PAN Number").unwrap().as_str(), "ABCDE1234F");
}

/// An Aadhaar card without a valid grouped number fails with the fixed
/// reason, and the number field carries the sentinel rather than vanishing.
#[test]
fn aadhaar_without_number_fails() {
    let report = verifier().verify_text("AADHAAR\nName: Jane Doe\nno number printed here");

    assert_eq!(report.doc_type, DocumentType::AadhaarCard);
    assert_eq!(report.status, VerificationStatus::Failed);
    assert!(
        report
            .failure_reasons
            .contains(&"Valid Aadhaar number not found.".to_string())
    );
    assert_eq!(
        report.fields.get("Aadhaar Number"),
        Some(&FieldValue::NotFound)
    );
}

/// Unrelated text is Unknown: one fixed reason, no extracted fields.
#[test]
fn unrelated_text_is_unknown_and_fails() {
    let report = verifier().verify_text("minutes of the annual gardening club meeting");

    assert_eq!(report.doc_type, DocumentType::Unknown);
    assert_eq!(report.status, VerificationStatus::Failed);
    assert_eq!(
        report.failure_reasons,
        vec!["Could not determine document type."]
    );
    assert!(report.fields.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
//  Determinism and schema stability
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn classification_is_stable_across_repeated_calls() {
    let v = verifier();
    for _ in 0..5 {
        let report = v.verify_text("Income Tax Department");
        assert_eq!(report.doc_type, DocumentType::PanCard);
    }
}

#[test]
fn pan_schema_always_contains_pan_number_key() {
    let v = verifier();

    // Matched and unmatched texts both expose the key.
    let with_number = v.verify_text("income tax department ABCDE1234F");
    let without_number = v.verify_text("income tax department, number smudged");

    assert!(with_number.fields.get("PAN Number").unwrap().is_found());
    assert_eq!(
        without_number.fields.get("PAN Number"),
        Some(&FieldValue::NotFound)
    );
}

#[test]
fn failure_reasons_follow_policy_order() {
    // Neither name nor number present: reasons must come in policy
    // declaration order.
    let report = verifier().verify_text("income tax department only");

    assert_eq!(
        report.failure_reasons,
        vec!["Name not found.", "Valid PAN number not found."]
    );
}

// ═══════════════════════════════════════════════════════════════════════
//  Supplementary document types
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn school_certificate_requires_year() {
    let report = verifier().verify_text(
        "Senior Secondary Examination\nName: Jane Doe\nBoard: CBSE",
    );

    assert_eq!(report.doc_type, DocumentType::TwelfthCertificate);
    assert_eq!(report.status, VerificationStatus::Failed);
    assert_eq!(report.failure_reasons, vec!["Year of passing not found."]);
}

#[test]
fn fee_structure_verifies_with_amount() {
    let report = verifier().verify_text(
        "Fee Structure 2024\nCollege: IIT Bombay\nTotal Fee: Rs. 8,50,000",
    );

    assert_eq!(report.doc_type, DocumentType::CourseFeeStructure);
    assert_eq!(report.status, VerificationStatus::Verified);
    assert_eq!(report.fields.get("Total Fee").unwrap().as_str(), "8,50,000");
}

#[test]
fn income_proof_requires_amount() {
    let report = verifier().verify_text("Salary Slip for March, amount illegible");

    assert_eq!(report.doc_type, DocumentType::IncomeProof);
    assert_eq!(report.status, VerificationStatus::Failed);
    assert_eq!(report.failure_reasons, vec!["Valid income amount not found."]);
}
