//! Core value types for the triage pipeline
//!
//! Everything here is request-scoped: created fresh per call and never
//! mutated afterwards. Field names of the serialized forms are part of the
//! HTTP contract and must not change.

use serde::{Deserialize, Serialize};

/// Fixed set of PII categories the masking engine detects
///
/// Declaration order matters: it is the final tiebreak when two detected
/// spans share both start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    /// National ID number (three groups of four digits)
    AadharNum,
    /// Payment card number (13 to 16 digits)
    CreditDebitNo,
    /// Card expiry date (MM/YY or MM/YYYY)
    ExpiryNo,
    /// Card security code (three bare digits)
    CvvNo,
    /// Date of birth (DD/MM/YYYY)
    Dob,
    /// Ten-digit mobile number starting with 6-9
    PhoneNumber,
    Email,
    /// Name following an introductory phrase ("my name is ...")
    FullName,
}

impl PiiCategory {
    /// All categories in declaration order
    pub const ALL: [PiiCategory; 8] = [
        Self::AadharNum,
        Self::CreditDebitNo,
        Self::ExpiryNo,
        Self::CvvNo,
        Self::Dob,
        Self::PhoneNumber,
        Self::Email,
        Self::FullName,
    ];

    /// Wire tag, also used inside the placeholder token
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AadharNum => "aadhar_num",
            Self::CreditDebitNo => "credit_debit_no",
            Self::ExpiryNo => "expiry_no",
            Self::CvvNo => "cvv_no",
            Self::Dob => "dob",
            Self::PhoneNumber => "phone_number",
            Self::Email => "email",
            Self::FullName => "full_name",
        }
    }

    /// Placeholder substituted for a detected span, e.g. `[email]`
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.as_str())
    }
}

impl std::fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A masked span of the original text
///
/// `start` and `end` are half-open character offsets into the original
/// (unmasked) input, and `value` is exactly the characters in that range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EntityRecord", from = "EntityRecord")]
pub struct DetectedEntity {
    pub start: usize,
    pub end: usize,
    pub category: PiiCategory,
    pub value: String,
}

/// Wire shape of [`DetectedEntity`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntityRecord {
    position: [usize; 2],
    classification: PiiCategory,
    entity: String,
}

impl From<DetectedEntity> for EntityRecord {
    fn from(e: DetectedEntity) -> Self {
        Self {
            position: [e.start, e.end],
            classification: e.category,
            entity: e.value,
        }
    }
}

impl From<EntityRecord> for DetectedEntity {
    fn from(r: EntityRecord) -> Self {
        Self {
            start: r.position[0],
            end: r.position[1],
            category: r.classification,
            value: r.entity,
        }
    }
}

/// Output of the masking engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingResult {
    pub masked_text: String,

    /// Entities ordered by decreasing start (rightmost first)
    pub entities: Vec<DetectedEntity>,
}

impl MaskingResult {
    /// Replay the reported substitutions against `original`
    ///
    /// Applies each entity's placeholder at its offsets, in reported order.
    /// For any result produced by the engine this equals `masked_text`.
    pub fn reconstruct(&self, original: &str) -> String {
        let mut working: Vec<char> = original.chars().collect();
        for entity in &self.entities {
            splice_placeholder(&mut working, entity.start, entity.end, entity.category);
        }
        working.into_iter().collect()
    }

    /// True when nothing was masked
    pub fn is_clean(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Replace `working[start..end]` with the category placeholder
///
/// Both bounds are clamped to the current length so a span overlapping an
/// earlier substitution never indexes past the end.
pub(crate) fn splice_placeholder(
    working: &mut Vec<char>,
    start: usize,
    end: usize,
    category: PiiCategory,
) {
    let len = working.len();
    let start = start.min(len);
    let end = end.clamp(start, len);
    working.splice(start..end, category.placeholder().chars());
}

/// Full pipeline output returned to the HTTP and CLI callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub input_email_body: String,
    pub list_of_masked_entities: Vec<DetectedEntity>,
    pub masked_email: String,
    pub category_of_the_email: String,
}
