//! Field extraction engine.
//!
//! Compiles the per-type rule tables once and evaluates them
//! deterministically: rules in declaration order, at most one field set per
//! rule, first match wins per field, and every schema field present in the
//! output even when nothing matched.

use std::collections::HashMap;

use regex::Regex;

use crate::config::EngineConfig;
use crate::error::{Result, VerifyError};
use crate::ner::EntityRecognizer;
use crate::rules::{self, RuleKind};
use crate::types::{DocumentType, FieldSet};

enum CompiledKind {
    Pattern(Regex),
    Person,
    DateOfBirth,
}

struct CompiledRule {
    field: &'static str,
    kind: CompiledKind,
}

struct TypeTable {
    /// Unique field names in rule declaration order.
    schema: Vec<&'static str>,
    rules: Vec<CompiledRule>,
}

/// Applies a document type's rule table to extracted text.
pub struct FieldExtractionEngine {
    tables: HashMap<DocumentType, TypeTable>,
    ner: EntityRecognizer,
}

impl FieldExtractionEngine {
    /// Compile all rule tables.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let mut tables = HashMap::new();

        for &doc_type in rules::RULED_TYPES {
            let specs = rules::table(doc_type);

            let mut schema: Vec<&'static str> = Vec::new();
            let mut compiled = Vec::with_capacity(specs.len());

            for spec in specs {
                if !schema.contains(&spec.field) {
                    schema.push(spec.field);
                }
                let kind = match spec.kind {
                    RuleKind::Pattern(pattern) => CompiledKind::Pattern(
                        Regex::new(pattern).map_err(|e| VerifyError::InvalidPattern {
                            pattern: pattern.to_string(),
                            reason: e.to_string(),
                        })?,
                    ),
                    RuleKind::Person => CompiledKind::Person,
                    RuleKind::DateOfBirth => CompiledKind::DateOfBirth,
                };
                compiled.push(CompiledRule {
                    field: spec.field,
                    kind,
                });
            }

            tables.insert(
                doc_type,
                TypeTable {
                    schema,
                    rules: compiled,
                },
            );
        }

        Ok(Self {
            tables,
            ner: EntityRecognizer::new(config.name_min_tokens)?,
        })
    }

    /// Extract the fields of `doc_type` from `text`.
    ///
    /// Always returns the full schema for the type; unmatched fields carry
    /// the `"Not Found"` sentinel. `Unknown` has an empty schema.
    pub fn extract(&self, text: &str, doc_type: DocumentType) -> FieldSet {
        let Some(table) = self.tables.get(&doc_type) else {
            return FieldSet::empty();
        };

        let mut fields = FieldSet::with_schema(table.schema.iter().copied());

        for rule in &table.rules {
            if fields.is_found(rule.field) {
                continue;
            }

            let value = match &rule.kind {
                CompiledKind::Pattern(re) => re
                    .captures(text)
                    .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
                    .map(|m| m.as_str().trim().to_string()),
                CompiledKind::Person => self.ner.first_person(text),
                CompiledKind::DateOfBirth => self.ner.first_dob(text),
            };

            if let Some(value) = value {
                fields.fill(rule.field, value);
            }
        }

        tracing::debug!(
            doc_type = %doc_type,
            found = fields.iter().filter(|(_, v)| v.is_found()).count(),
            total = fields.len(),
            "field extraction complete"
        );

        fields
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;

    fn engine() -> FieldExtractionEngine {
        FieldExtractionEngine::new(&EngineConfig::default()).unwrap()
    }

    #[test]
    fn pan_schema_is_stable() {
        let e = engine();
        let fields = e.extract("completely unrelated text", DocumentType::PanCard);

        // Every schema key is present even when nothing matched.
        assert_eq!(fields.get("Name"), Some(&FieldValue::NotFound));
        assert_eq!(fields.get("Date of Birth"), Some(&FieldValue::NotFound));
        assert_eq!(fields.get("PAN Number"), Some(&FieldValue::NotFound));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn pan_card_full_extraction() {
        let e = engine();
        let text = "INCOME TAX DEPARTMENT\nName: Jane Doe\nDOB 14/08/1998\nABCDE1234F";
        let fields = e.extract(text, DocumentType::PanCard);

        assert_eq!(fields.get("Name").unwrap().as_str(), "Jane Doe");
        assert_eq!(fields.get("Date of Birth").unwrap().as_str(), "14/08/1998");
        assert_eq!(fields.get("PAN Number").unwrap().as_str(), "ABCDE1234F");
    }

    #[test]
    fn labelled_name_beats_entity_fallback() {
        let e = engine();
        // "Rahul Sharma" appears first in the text, but the labelled rule
        // runs before the entity rule and the field is filled only once.
        let text = "guardian Rahul Sharma\nName: Jane Doe";
        let fields = e.extract(text, DocumentType::PanCard);

        assert_eq!(fields.get("Name").unwrap().as_str(), "Jane Doe");
    }

    #[test]
    fn entity_fallback_requires_multiple_tokens() {
        let e = engine();
        let fields = e.extract("holder Jane, income tax dept", DocumentType::PanCard);
        assert_eq!(fields.get("Name"), Some(&FieldValue::NotFound));

        let fields = e.extract("holder Jane Doe here", DocumentType::PanCard);
        assert_eq!(fields.get("Name").unwrap().as_str(), "Jane Doe");
    }

    #[test]
    fn pan_number_is_pattern_only() {
        let e = engine();
        // Lowercase and mis-grouped identifiers must not match.
        let fields = e.extract("abcde1234f and ABCDE12345", DocumentType::PanCard);
        assert_eq!(fields.get("PAN Number"), Some(&FieldValue::NotFound));
    }

    #[test]
    fn dob_rejects_other_formats() {
        let e = engine();
        let fields = e.extract("DOB: 1998-08-14", DocumentType::PanCard);
        assert_eq!(fields.get("Date of Birth"), Some(&FieldValue::NotFound));
    }

    #[test]
    fn aadhaar_labelled_fields() {
        let e = engine();
        let text = "Full Name: Jane Doe\nDOB: 14/08/1998\nGender: Female\n\
                    Address: 12 MG Road, Pune\nAadhaar Number: 1234 5678 9012";
        let fields = e.extract(text, DocumentType::AadhaarCard);

        assert_eq!(fields.get("Name").unwrap().as_str(), "Jane Doe");
        assert_eq!(fields.get("Gender").unwrap().as_str(), "Female");
        assert_eq!(fields.get("Aadhaar Number").unwrap().as_str(), "1234 5678 9012");
        assert_eq!(fields.get("Address").unwrap().as_str(), "12 MG Road, Pune");
    }

    #[test]
    fn aadhaar_number_requires_grouped_digits() {
        let e = engine();
        let fields = e.extract("AADHAAR 123456789012", DocumentType::AadhaarCard);
        assert_eq!(fields.get("Aadhaar Number"), Some(&FieldValue::NotFound));
    }

    #[test]
    fn certificate_year_of_passing() {
        let e = engine();
        let text = "Name: Jane Doe\nBoard: CBSE\nYear of Passing: 2016";
        let fields = e.extract(text, DocumentType::TenthCertificate);

        assert_eq!(fields.get("Board").unwrap().as_str(), "CBSE");
        assert_eq!(fields.get("Year of Passing").unwrap().as_str(), "2016");
    }

    #[test]
    fn bare_year_fallback() {
        let e = engine();
        let fields = e.extract("passed in 2018 with distinction", DocumentType::TwelfthCertificate);
        assert_eq!(fields.get("Year of Passing").unwrap().as_str(), "2018");
    }

    #[test]
    fn fee_structure_amounts() {
        let e = engine();
        let text = "College: IIT Bombay\nTotal Fee: Rs. 8,50,000 payable in four terms";
        let fields = e.extract(text, DocumentType::CourseFeeStructure);

        assert_eq!(fields.get("Institution").unwrap().as_str(), "IIT Bombay");
        assert_eq!(fields.get("Total Fee").unwrap().as_str(), "8,50,000");
    }

    #[test]
    fn income_proof_amount_fallback() {
        let e = engine();
        // No "Annual Income" label; the generic rupee amount rule fills in.
        let fields = e.extract("Salary Slip\nNet pay INR 52,000", DocumentType::IncomeProof);
        assert_eq!(fields.get("Annual Income").unwrap().as_str(), "52,000");
    }

    #[test]
    fn collateral_owner_and_value() {
        let e = engine();
        let text = "Owner Name: Jane Doe\nMarket Value: Rs. 74,00,000";
        let fields = e.extract(text, DocumentType::CollateralDocument);

        assert_eq!(fields.get("Owner Name").unwrap().as_str(), "Jane Doe");
        assert_eq!(fields.get("Property Value").unwrap().as_str(), "74,00,000");
    }

    #[test]
    fn unknown_type_has_empty_schema() {
        let e = engine();
        let fields = e.extract("anything at all", DocumentType::Unknown);
        assert!(fields.is_empty());
    }
}
