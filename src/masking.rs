//! PII detection and masking
//!
//! Every rule is applied independently to the original text. All matches are
//! collected as candidates, ordered by descending start (then descending end,
//! then category declaration order), and substituted right to left so the
//! offsets of spans further left stay valid.
//!
//! Overlapping candidates are not suppressed. When one span overlaps another
//! that was already replaced, the second substitution lands on the working
//! text as-is and may cut into the first placeholder.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::{splice_placeholder, DetectedEntity, MaskingResult, PiiCategory};

/// A compiled detection rule
#[derive(Debug)]
pub struct PiiRule {
    pub category: PiiCategory,
    regex: Regex,
    /// Capture group reported instead of the whole match
    group: Option<usize>,
}

fn rule_source(category: PiiCategory) -> (&'static str, Option<usize>) {
    match category {
        PiiCategory::AadharNum => (r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}\b", None),
        PiiCategory::CreditDebitNo => (r"\b(?:\d[ -]*?){13,16}\b", None),
        PiiCategory::ExpiryNo => (r"\b(0[1-9]|1[0-2])/(\d{2}|\d{4})\b", None),
        PiiCategory::CvvNo => (r"\b\d{3}\b", None),
        PiiCategory::Dob => (r"\b\d{2}/\d{2}/\d{4}\b", None),
        PiiCategory::PhoneNumber => (r"\b[6-9]\d{9}\b", None),
        PiiCategory::Email => (r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b", None),
        PiiCategory::FullName => (
            r"\b(?i:i\s*am|i'm|my\s*name\s*is|this\s*is)\s+([A-Z][a-z]+(?:\s[A-Z][a-z]+)?)",
            Some(1),
        ),
    }
}

/// Built-in rules in category declaration order, compiled once and cached
pub fn builtin_rules() -> &'static [PiiRule] {
    static RULES: OnceLock<Vec<PiiRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        PiiCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let (pattern, group) = rule_source(category);
                match Regex::new(pattern) {
                    Ok(regex) => Some(PiiRule {
                        category,
                        regex,
                        group,
                    }),
                    Err(e) => {
                        tracing::error!(%category, error = %e, "Failed to compile PII rule");
                        None
                    }
                }
            })
            .collect()
    })
}

/// Maps regex byte offsets to character offsets for one input
struct CharOffsets {
    /// Byte offset of every char start, plus the total length
    boundaries: Option<Vec<usize>>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        let boundaries = (!text.is_ascii()).then(|| {
            text.char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(text.len()))
                .collect()
        });
        Self { boundaries }
    }

    fn char_offset(&self, byte: usize) -> usize {
        match &self.boundaries {
            None => byte,
            Some(b) => b.binary_search(&byte).unwrap_or_else(|i| i),
        }
    }
}

/// Descending start, then descending end, then rule declaration order
fn substitution_order(a: &(DetectedEntity, usize), b: &(DetectedEntity, usize)) -> Ordering {
    b.0.start
        .cmp(&a.0.start)
        .then(b.0.end.cmp(&a.0.end))
        .then(a.1.cmp(&b.1))
}

/// Regex-based PII masking engine
///
/// Cheap to construct: the rule set is compiled on first use and shared by
/// every engine in the process. Results are never cached across inputs.
#[derive(Debug, Clone, Copy)]
pub struct MaskingEngine {
    rules: &'static [PiiRule],
}

impl Default for MaskingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskingEngine {
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Detect every PII span in `text`, in substitution order
    ///
    /// Offsets are character offsets into `text`.
    pub fn detect(&self, text: &str) -> Vec<DetectedEntity> {
        let offsets = CharOffsets::new(text);
        // (entity, rule index) so the declaration order survives the sort
        let mut candidates: Vec<(DetectedEntity, usize)> = Vec::new();

        for (order, rule) in self.rules.iter().enumerate() {
            match rule.group {
                None => {
                    for mat in rule.regex.find_iter(text) {
                        candidates.push((
                            DetectedEntity {
                                start: offsets.char_offset(mat.start()),
                                end: offsets.char_offset(mat.end()),
                                category: rule.category,
                                value: mat.as_str().to_string(),
                            },
                            order,
                        ));
                    }
                }
                Some(group) => {
                    for caps in rule.regex.captures_iter(text) {
                        let Some(mat) = caps.get(group) else {
                            continue;
                        };
                        candidates.push((
                            DetectedEntity {
                                start: offsets.char_offset(mat.start()),
                                end: offsets.char_offset(mat.end()),
                                category: rule.category,
                                value: mat.as_str().to_string(),
                            },
                            order,
                        ));
                    }
                }
            }
        }

        candidates.sort_by(substitution_order);

        candidates.into_iter().map(|(entity, _)| entity).collect()
    }

    /// Mask every detected span with its category placeholder
    pub fn mask(&self, text: &str) -> MaskingResult {
        let entities = self.detect(text);
        if entities.is_empty() {
            return MaskingResult {
                masked_text: text.to_string(),
                entities,
            };
        }

        let mut working: Vec<char> = text.chars().collect();
        for entity in &entities {
            splice_placeholder(&mut working, entity.start, entity.end, entity.category);
        }

        MaskingResult {
            masked_text: working.into_iter().collect(),
            entities,
        }
    }
}

/// Mask `text` with the built-in rule set
pub fn mask_pii(text: &str) -> MaskingResult {
    MaskingEngine::new().mask(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(result: &MaskingResult) -> Vec<PiiCategory> {
        result.entities.iter().map(|e| e.category).collect()
    }

    #[test]
    fn test_all_rules_compile() {
        let rules = builtin_rules();
        assert_eq!(rules.len(), PiiCategory::ALL.len());
        for (rule, category) in rules.iter().zip(PiiCategory::ALL) {
            assert_eq!(rule.category, category);
        }
    }

    #[test]
    fn test_empty_input() {
        let result = mask_pii("");
        assert_eq!(result.masked_text, "");
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_no_pii_unchanged() {
        let text = "Hello team, the dashboard is loading slowly today.";
        let result = mask_pii(text);
        assert_eq!(result.masked_text, text);
        assert!(result.is_clean());
    }

    #[test]
    fn test_email() {
        let result = mask_pii("Contact me at john.doe@example.com");
        assert_eq!(categories(&result), vec![PiiCategory::Email]);
        assert_eq!(result.entities[0].value, "john.doe@example.com");
        assert_eq!(result.entities[0].start, 14);
        assert_eq!(result.entities[0].end, 34);
        assert_eq!(result.masked_text, "Contact me at [email]");
    }

    #[test]
    fn test_email_uppercase_domain() {
        let result = mask_pii("write to Support@Example.COM please");
        assert_eq!(categories(&result), vec![PiiCategory::Email]);
        assert_eq!(result.entities[0].value, "Support@Example.COM");
    }

    #[test]
    fn test_phone() {
        let result = mask_pii("My phone is 9876543210");
        assert_eq!(categories(&result), vec![PiiCategory::PhoneNumber]);
        assert_eq!(result.entities[0].value, "9876543210");
        assert_eq!(result.masked_text, "My phone is [phone_number]");
    }

    #[test]
    fn test_phone_must_start_with_six_to_nine() {
        let result = mask_pii("ref 1234567890");
        assert!(!categories(&result).contains(&PiiCategory::PhoneNumber));
    }

    #[test]
    fn test_full_name_excludes_phrase() {
        let result = mask_pii("My name is John Smith");
        assert_eq!(categories(&result), vec![PiiCategory::FullName]);
        let entity = &result.entities[0];
        assert_eq!(entity.value, "John Smith");
        assert_eq!((entity.start, entity.end), (11, 21));
        assert_eq!(result.masked_text, "My name is [full_name]");
    }

    #[test]
    fn test_full_name_phrases() {
        for (text, name) in [
            ("Hi, I am Priya", "Priya"),
            ("hello, i'm Ravi Kumar.", "Ravi Kumar"),
            ("THIS IS Anita speaking", "Anita"),
        ] {
            let result = mask_pii(text);
            assert_eq!(categories(&result), vec![PiiCategory::FullName], "{text}");
            assert_eq!(result.entities[0].value, name);
        }
    }

    #[test]
    fn test_full_name_requires_capitalized_word() {
        let result = mask_pii("I am having trouble logging in");
        assert!(result.is_clean());
    }

    #[test]
    fn test_full_name_ignores_all_caps_and_lowercase_names() {
        // only the introductory phrase is case-insensitive
        assert!(mask_pii("I am JOHN SMITH").is_clean());
        assert!(mask_pii("my name is john smith").is_clean());

        let result = mask_pii("MY NAME IS John SMITH");
        assert_eq!(categories(&result), vec![PiiCategory::FullName]);
        assert_eq!(result.entities[0].value, "John");
    }

    #[test]
    fn test_card_and_expiry() {
        let result = mask_pii("card 4111 1111 1111 1111 exp 12/26");
        let found = categories(&result);
        assert!(found.contains(&PiiCategory::CreditDebitNo));
        assert!(found.contains(&PiiCategory::ExpiryNo));

        let card = result
            .entities
            .iter()
            .find(|e| e.category == PiiCategory::CreditDebitNo)
            .unwrap();
        assert_eq!(card.value, "4111 1111 1111 1111");
        assert_eq!(card.start, 5);
    }

    #[test]
    fn test_expiry_rejects_month_thirteen() {
        let result = mask_pii("valid thru 13/26");
        assert!(!categories(&result).contains(&PiiCategory::ExpiryNo));
    }

    #[test]
    fn test_cvv_and_dob() {
        let result = mask_pii("cvv 123, born 01/02/1990");
        let found = categories(&result);
        assert!(found.contains(&PiiCategory::CvvNo));
        assert!(found.contains(&PiiCategory::Dob));
    }

    #[test]
    fn test_aadhar_with_hyphens() {
        let result = mask_pii("id 1234-5678-9012 ok");
        assert_eq!(categories(&result), vec![PiiCategory::AadharNum]);
        assert_eq!(result.masked_text, "id [aadhar_num] ok");
    }

    #[test]
    fn test_entities_descending_start() {
        let text = "I am Meera, mail meera@corp.in or call 9123456780";
        let result = mask_pii(text);
        assert_eq!(
            categories(&result),
            vec![
                PiiCategory::PhoneNumber,
                PiiCategory::Email,
                PiiCategory::FullName
            ]
        );
        let starts: Vec<usize> = result.entities.iter().map(|e| e.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(starts, sorted);
        assert_eq!(
            result.masked_text,
            "I am [full_name], mail [email] or call [phone_number]"
        );
    }

    #[test]
    fn test_same_start_longer_span_first() {
        // aadhar matches the first 12 digits, the card rule all 16
        let result = mask_pii("4111 1111 1111 1111");
        assert_eq!(
            categories(&result),
            vec![PiiCategory::CreditDebitNo, PiiCategory::AadharNum]
        );
        assert_eq!(result.entities[0].end, 19);
        assert_eq!(result.entities[1].end, 14);
    }

    #[test]
    fn test_same_span_uses_declaration_order() {
        let span = |category| DetectedEntity {
            start: 3,
            end: 15,
            category,
            value: String::new(),
        };
        let mut candidates = vec![
            (span(PiiCategory::Email), 6),
            (span(PiiCategory::AadharNum), 0),
            (span(PiiCategory::Dob), 4),
        ];
        candidates.sort_by(substitution_order);
        let order: Vec<PiiCategory> = candidates.iter().map(|(e, _)| e.category).collect();
        assert_eq!(
            order,
            vec![PiiCategory::AadharNum, PiiCategory::Dob, PiiCategory::Email]
        );
    }

    #[test]
    fn test_offsets_are_characters() {
        let text = "Grüße, écrivez à anne@exemple.fr";
        let result = mask_pii(text);
        assert_eq!(result.entities.len(), 1);
        let entity = &result.entities[0];
        let chars: Vec<char> = text.chars().collect();
        let slice: String = chars[entity.start..entity.end].iter().collect();
        assert_eq!(slice, entity.value);
        assert_eq!(result.masked_text, "Grüße, écrivez à [email]");
    }

    #[test]
    fn test_deterministic() {
        let text = "I'm Arjun Rao, card 4111-1111-1111-1111 cvv 321 dob 04/05/1988";
        assert_eq!(mask_pii(text), mask_pii(text));
    }

    #[test]
    fn test_reconstruction_with_overlaps() {
        let text = "pay 4111 1111 1111 1111 exp 09/2027 cvv 737 call 9988776655";
        let result = mask_pii(text);
        assert_eq!(result.reconstruct(text), result.masked_text);
    }

    #[test]
    fn test_placeholders_not_redetected() {
        let masked = "I am [full_name], mail [email] or call [phone_number] \
                      card [credit_debit_no] [expiry_no] [cvv_no] [dob] [aadhar_num]";
        assert!(mask_pii(masked).is_clean());
    }
}
