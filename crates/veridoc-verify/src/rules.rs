//! Per-document-type field extraction rule tables.
//!
//! Each table is an ordered list of `(field, rule)` pairs. Rules run in
//! declaration order; a field keeps the value of its first matching rule.
//! Labelled patterns come before entity-heuristic fallbacks for the same
//! field, and fixed-format identifiers (PAN, Aadhaar) are pattern-only.

use crate::types::DocumentType;

/// How a field's value is located in the text.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RuleKind {
    /// A regex; capture group 1 (or the whole match) is the value.
    Pattern(&'static str),
    /// First multi-token person candidate from the entity recognizer.
    Person,
    /// First `DD/MM/YYYY` date span from the entity recognizer.
    DateOfBirth,
}

/// One entry of a rule table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleSpec {
    pub field: &'static str,
    pub kind: RuleKind,
}

const fn pattern(field: &'static str, re: &'static str) -> RuleSpec {
    RuleSpec {
        field,
        kind: RuleKind::Pattern(re),
    }
}

const fn person(field: &'static str) -> RuleSpec {
    RuleSpec {
        field,
        kind: RuleKind::Person,
    }
}

const fn dob(field: &'static str) -> RuleSpec {
    RuleSpec {
        field,
        kind: RuleKind::DateOfBirth,
    }
}

// -- Shared patterns --------------------------------------------------------

/// `Name: Jane Doe` and `Full Name - Jane Doe`. The value must look like a
/// capitalized multi-token span so trailing labels ("DOB") are not absorbed.
const NAME_LABELLED: &str = r"\b(?i:name)\s*[:\-]\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)";

/// PAN format: five letters, four digits, one letter. Pattern-only by
/// design; identifiers are never taken from entity recognition.
const PAN_NUMBER: &str = r"\b([A-Z]{5}[0-9]{4}[A-Z])\b";

/// Aadhaar format: three space-separated 4-digit groups.
const AADHAAR_NUMBER: &str = r"\b(\d{4}\s\d{4}\s\d{4})\b";

const GENDER: &str = r"\b(?i:gender)\s*[:\-]?\s*((?i:male|female|transgender))\b";

const ADDRESS: &str = r"\b(?i:address)\s*[:\-]\s*([^\n]+)";

const BOARD: &str = r"\b(?i:board)\s*[:\-]\s*([^\n]+)";

const YEAR_LABELLED: &str = r"\b(?i:year\s+of\s+passing)\s*[:\-]?\s*((?:19|20)\d{2})\b";

const YEAR_BARE: &str = r"\b((?:19|20)\d{2})\b";

const UNIVERSITY_LABELLED: &str = r"\b(?i:university)\s*[:\-]\s*([^\n]+)";

const UNIVERSITY_OF: &str = r"\b((?:University|Institute)\s+of\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)";

const INSTITUTION: &str = r"\b(?i:institution|college|institute)\s*(?i:name)?\s*[:\-]\s*([^\n]+)";

/// A rupee amount: `Rs. 1,20,000`, `INR 50000`, `₹ 4,80,000.50`.
const AMOUNT: &str = r"(?:Rs\.?|INR|₹)\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)";

const TOTAL_FEE: &str = r"\b(?i:total\s+(?:course\s+)?fee)[^\n]*?(?:Rs\.?|INR|₹)\s*([0-9][0-9,]*)";

const ANNUAL_INCOME: &str = r"\b(?i:annual\s+income)[^\n]*?(?:Rs\.?|INR|₹)\s*([0-9][0-9,]*)";

const EMPLOYER: &str = r"\b(?i:employer)\s*(?i:name)?\s*[:\-]\s*([^\n]+)";

const OWNER_LABELLED: &str =
    r"\b(?i:owner)\s*(?i:name)?\s*[:\-]\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)";

const PROPERTY_VALUE: &str =
    r"\b(?i:(?:property|market)\s+value)[^\n]*?(?:Rs\.?|INR|₹)\s*([0-9][0-9,]*)";

// -- Tables -----------------------------------------------------------------

const PAN_CARD: &[RuleSpec] = &[
    pattern("Name", NAME_LABELLED),
    person("Name"),
    dob("Date of Birth"),
    pattern("PAN Number", PAN_NUMBER),
];

const AADHAAR_CARD: &[RuleSpec] = &[
    pattern("Name", NAME_LABELLED),
    person("Name"),
    dob("Date of Birth"),
    pattern("Gender", GENDER),
    pattern("Aadhaar Number", AADHAAR_NUMBER),
    pattern("Address", ADDRESS),
];

const SCHOOL_CERTIFICATE: &[RuleSpec] = &[
    pattern("Name", NAME_LABELLED),
    person("Name"),
    pattern("Board", BOARD),
    pattern("Year of Passing", YEAR_LABELLED),
    pattern("Year of Passing", YEAR_BARE),
];

const UG_CERTIFICATE: &[RuleSpec] = &[
    pattern("Name", NAME_LABELLED),
    person("Name"),
    pattern("University", UNIVERSITY_LABELLED),
    pattern("University", UNIVERSITY_OF),
    pattern("Year of Passing", YEAR_LABELLED),
    pattern("Year of Passing", YEAR_BARE),
];

const COURSE_FEE_STRUCTURE: &[RuleSpec] = &[
    pattern("Institution", INSTITUTION),
    pattern("Total Fee", TOTAL_FEE),
    pattern("Total Fee", AMOUNT),
];

const INCOME_PROOF: &[RuleSpec] = &[
    pattern("Name", NAME_LABELLED),
    person("Name"),
    pattern("Annual Income", ANNUAL_INCOME),
    pattern("Annual Income", AMOUNT),
    pattern("Employer", EMPLOYER),
];

const COLLATERAL_DOCUMENT: &[RuleSpec] = &[
    pattern("Owner Name", OWNER_LABELLED),
    person("Owner Name"),
    pattern("Property Value", PROPERTY_VALUE),
    pattern("Property Value", AMOUNT),
];

/// Every classifiable type, in marker-table order. `Unknown` has no rules.
pub(crate) const RULED_TYPES: &[DocumentType] = &[
    DocumentType::PanCard,
    DocumentType::AadhaarCard,
    DocumentType::TwelfthCertificate,
    DocumentType::TenthCertificate,
    DocumentType::UgCertificate,
    DocumentType::CourseFeeStructure,
    DocumentType::IncomeProof,
    DocumentType::CollateralDocument,
];

/// The rule table for `doc_type`; empty for [`DocumentType::Unknown`].
pub(crate) fn table(doc_type: DocumentType) -> &'static [RuleSpec] {
    match doc_type {
        DocumentType::PanCard => PAN_CARD,
        DocumentType::AadhaarCard => AADHAAR_CARD,
        DocumentType::TenthCertificate | DocumentType::TwelfthCertificate => SCHOOL_CERTIFICATE,
        DocumentType::UgCertificate => UG_CERTIFICATE,
        DocumentType::CourseFeeStructure => COURSE_FEE_STRUCTURE,
        DocumentType::IncomeProof => INCOME_PROOF,
        DocumentType::CollateralDocument => COLLATERAL_DOCUMENT,
        DocumentType::Unknown => &[],
    }
}
