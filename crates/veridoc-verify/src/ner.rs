//! Lightweight named-entity heuristics.
//!
//! Identity documents are too short and too noisy for a statistical NER
//! model to earn its weight, so person and date spans are recognized with
//! capitalization heuristics plus a stoplist of institutional vocabulary.
//! The rules engine prefers labelled patterns and only falls back to these
//! heuristics when no label is present.

use regex::Regex;

use crate::error::{Result, VerifyError};

/// Words that disqualify a capitalized span from being a person name.
/// Lowercased for comparison.
const INSTITUTIONAL_WORDS: &[&str] = &[
    "department",
    "government",
    "india",
    "authority",
    "income",
    "tax",
    "card",
    "bank",
    "certificate",
    "board",
    "university",
    "college",
    "school",
    "aadhaar",
    "pan",
    "unique",
    "identification",
    "account",
    "number",
    "permanent",
    "salary",
    "slip",
];

/// Recognizes person-name and date-of-birth spans in document text.
pub struct EntityRecognizer {
    person: Regex,
    dob: Regex,
    min_tokens: usize,
}

impl EntityRecognizer {
    /// Build the recognizer. `min_tokens` is the minimum number of
    /// space-separated tokens a person candidate must have.
    pub fn new(min_tokens: usize) -> Result<Self> {
        // Runs of capitalized words. All-caps words are deliberately
        // excluded: headers like "INCOME TAX DEPARTMENT" dominate card text.
        let person = compile(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b")?;
        let dob = compile(r"\b\d{2}/\d{2}/\d{4}\b")?;

        Ok(Self {
            person,
            dob,
            min_tokens,
        })
    }

    /// The first span that plausibly names a person.
    ///
    /// Only the first occurrence is considered for each candidate span;
    /// candidates below the token threshold or containing institutional
    /// vocabulary are rejected.
    pub fn first_person(&self, text: &str) -> Option<String> {
        for mat in self.person.find_iter(text) {
            let span = mat.as_str();
            let tokens: Vec<&str> = span.split_whitespace().collect();

            if tokens.len() < self.min_tokens {
                continue;
            }
            if tokens
                .iter()
                .any(|t| INSTITUTIONAL_WORDS.contains(&t.to_ascii_lowercase().as_str()))
            {
                continue;
            }

            return Some(span.to_string());
        }
        None
    }

    /// The first date span in `DD/MM/YYYY` form. Dates in any other format
    /// are not considered date-of-birth candidates at all.
    pub fn first_dob(&self, text: &str) -> Option<String> {
        self.dob.find(text).map(|m| m.as_str().to_string())
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| VerifyError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
