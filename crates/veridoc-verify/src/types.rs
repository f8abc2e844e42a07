//! Core data types shared by the classifier, extraction engine, and
//! verification policy.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Document types
// ---------------------------------------------------------------------------

/// The fixed set of document kinds the intake pipeline understands.
///
/// A document's type is determined exactly once, by the classifier, and
/// carried through extraction and verification unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "PAN Card")]
    PanCard,
    #[serde(rename = "Aadhaar Card")]
    AadhaarCard,
    #[serde(rename = "10th Certificate")]
    TenthCertificate,
    #[serde(rename = "12th Certificate")]
    TwelfthCertificate,
    #[serde(rename = "UG Certificate")]
    UgCertificate,
    #[serde(rename = "Course Fee Structure")]
    CourseFeeStructure,
    #[serde(rename = "Income Proof")]
    IncomeProof,
    #[serde(rename = "Collateral Document")]
    CollateralDocument,
    Unknown,
}

impl DocumentType {
    /// Human-readable name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PanCard => "PAN Card",
            Self::AadhaarCard => "Aadhaar Card",
            Self::TenthCertificate => "10th Certificate",
            Self::TwelfthCertificate => "12th Certificate",
            Self::UgCertificate => "UG Certificate",
            Self::CourseFeeStructure => "Course Fee Structure",
            Self::IncomeProof => "Income Proof",
            Self::CollateralDocument => "Collateral Document",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// The sentinel reported for a field no rule matched.
pub const NOT_FOUND: &str = "Not Found";

/// An extracted field value, or the explicit absence of one.
///
/// Absent fields are represented, not omitted: every document type has a
/// stable field schema, and consumers can rely on every key being present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A value pulled out of the document text.
    Found(String),
    /// No rule for this field matched.
    NotFound,
}

impl FieldValue {
    /// The value, or the `"Not Found"` sentinel.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Found(v) => v,
            Self::NotFound => NOT_FOUND,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Field sets
// ---------------------------------------------------------------------------

/// The structured fields extracted from one document.
///
/// Field order follows the document type's rule-table declaration order, and
/// every schema field is present from construction — initially as
/// [`FieldValue::NotFound`]. A field can be filled at most once; later rules
/// for the same field are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSet {
    entries: Vec<(String, FieldValue)>,
}

impl FieldSet {
    /// An empty set — the schema of [`DocumentType::Unknown`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// A set with every schema field present and unfilled.
    pub fn with_schema<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            entries: fields
                .into_iter()
                .map(|f| (f.to_string(), FieldValue::NotFound))
                .collect(),
        }
    }

    /// Fill `field` with `value` unless it was already filled.
    ///
    /// Returns `true` if the value was stored. Fields outside the schema are
    /// never created here.
    pub fn fill(&mut self, field: &str, value: String) -> bool {
        for (name, slot) in &mut self.entries {
            if name == field {
                if slot.is_found() {
                    return false;
                }
                *slot = FieldValue::Found(value);
                return true;
            }
        }
        false
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Whether `field` has been filled with a value.
    pub fn is_found(&self, field: &str) -> bool {
        self.get(field).is_some_and(FieldValue::is_found)
    }

    /// Iterate fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Verification reports
// ---------------------------------------------------------------------------

/// Pass/fail outcome of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    Failed,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of verifying one document. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub doc_type: DocumentType,
    pub fields: FieldSet,
    pub status: VerificationStatus,
    /// Human-readable failure reasons, in policy declaration order.
    pub failure_reasons: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl VerificationReport {
    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
