//! Structured response parsing for agent replies.
//!
//! The reasoning service is asked for a single JSON object, but replies are
//! free text: the object may be wrapped in prose or a fenced code block, and
//! individual fields may be missing or loosely typed. These functions are
//! pure text handling, with no I/O.
//!
//! | Input | Result |
//! |-------|--------|
//! | Well-formed object (anywhere in the text) | [`OutcomeSource::Structured`] outcome, missing fields defaulted |
//! | No object, or none that parses | [`DiagnosisOutcome::fallback`] |

use super::outcome::{DiagnosisOutcome, OutcomeSource};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Condition used when a structured block omits the diagnosis label.
pub const UNDETERMINED_CONDITION: &str = "Unable to determine";

/// Reasoning used when a structured block omits the reasoning text.
pub const NO_REASONING: &str = "No reasoning provided";

/// Parse a reasoning-service reply into a [`DiagnosisOutcome`].
///
/// Never fails: a reply without a usable structured block degrades to the
/// fallback outcome built from the raw text.
///
/// # Examples
///
/// ```
/// use council_domain::diagnosis::parsing::parse_diagnosis_response;
///
/// let reply = r#"Assessment follows.
/// {"primary_diagnosis": "Migraine", "confidence": "70%", "red_flags": "None"}"#;
/// let outcome = parse_diagnosis_response(reply);
/// assert_eq!(outcome.condition, "Migraine");
/// assert_eq!(outcome.confidence, 70.0);
/// assert_eq!(outcome.red_flags, vec!["None".to_string()]);
/// ```
pub fn parse_diagnosis_response(response: &str) -> DiagnosisOutcome {
    let Some(block) = extract_json_block(response) else {
        return DiagnosisOutcome::fallback(response);
    };

    match serde_json::from_value::<RawDiagnosis>(Value::Object(block)) {
        Ok(raw) => raw.into_outcome(),
        Err(_) => DiagnosisOutcome::fallback(response),
    }
}

/// Find the first JSON object embedded in free text.
///
/// Each `{` is tried as a start position and parsing stops at the end of
/// the first complete value, so prose after the object (braces included)
/// is ignored.
pub fn extract_json_block(response: &str) -> Option<Map<String, Value>> {
    response.match_indices('{').find_map(|(start, _)| {
        let mut values = serde_json::Deserializer::from_str(&response[start..]).into_iter::<Value>();
        match values.next() {
            Some(Ok(Value::Object(map))) => Some(map),
            _ => None,
        }
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDiagnosis {
    #[serde(alias = "diagnosis", alias = "condition")]
    primary_diagnosis: Option<String>,
    confidence: Option<Confidence>,
    reasoning: Option<String>,
    differential_diagnoses: Option<TextList>,
    recommended_tests: Option<TextList>,
    red_flags: Option<TextList>,
    icd10_code: Option<String>,
    next_steps: Option<TextList>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Confidence {
    Number(f64),
    Text(String),
}

impl Confidence {
    fn value(&self) -> f64 {
        match self {
            Confidence::Number(n) => *n,
            Confidence::Text(s) => s.trim().trim_end_matches('%').trim().parse().unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextList {
    Many(Vec<Value>),
    One(String),
}

impl TextList {
    fn into_vec(self) -> Vec<String> {
        match self {
            TextList::Many(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => non_empty(s),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect(),
            TextList::One(s) => non_empty(s).into_iter().collect(),
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl RawDiagnosis {
    fn into_outcome(self) -> DiagnosisOutcome {
        let list = |field: Option<TextList>| field.map(TextList::into_vec).unwrap_or_default();

        DiagnosisOutcome {
            condition: self
                .primary_diagnosis
                .and_then(non_empty)
                .unwrap_or_else(|| UNDETERMINED_CONDITION.to_string()),
            confidence: self.confidence.map(|c| c.value()).unwrap_or(0.0),
            reasoning: self
                .reasoning
                .and_then(non_empty)
                .unwrap_or_else(|| NO_REASONING.to_string()),
            icd10_code: self.icd10_code.and_then(non_empty),
            recommended_tests: list(self.recommended_tests),
            differential_diagnoses: list(self.differential_diagnoses),
            red_flags: list(self.red_flags),
            next_steps: self
                .next_steps
                .map(|steps| steps.into_vec().join("; "))
                .and_then(non_empty),
            source: OutcomeSource::Structured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::outcome::{FALLBACK_CONFIDENCE, UNSTRUCTURED_CONDITION};

    #[test]
    fn test_parse_well_formed_block() {
        let response = r#"{
            "primary_diagnosis": "Acute Coronary Syndrome",
            "confidence": 75,
            "reasoning": "Typical chest pain with diaphoresis in a 65 year old.",
            "differential_diagnoses": ["Pulmonary Embolism", "Aortic Dissection"],
            "recommended_tests": ["12-lead ECG", "Troponin"],
            "red_flags": ["Risk of sudden cardiac death"],
            "icd10_code": "I24.9",
            "next_steps": "Activate chest pain pathway"
        }"#;

        let outcome = parse_diagnosis_response(response);
        assert_eq!(outcome.condition, "Acute Coronary Syndrome");
        assert_eq!(outcome.confidence, 75.0);
        assert_eq!(outcome.differential_diagnoses.len(), 2);
        assert_eq!(outcome.recommended_tests[0], "12-lead ECG");
        assert_eq!(outcome.icd10_code.as_deref(), Some("I24.9"));
        assert_eq!(outcome.next_steps.as_deref(), Some("Activate chest pain pathway"));
        assert_eq!(outcome.source, OutcomeSource::Structured);
    }

    #[test]
    fn test_parse_block_inside_prose_and_fence() {
        let response = r#"Here is my assessment:
```json
{"primary_diagnosis": "Appendicitis", "confidence": 82.5}
```
Let me know if you need more."#;
        let outcome = parse_diagnosis_response(response);
        assert_eq!(outcome.condition, "Appendicitis");
        assert_eq!(outcome.confidence, 82.5);
    }

    #[test]
    fn test_stray_braces_in_prose_are_skipped() {
        let response = r#"Using template {SOAP}: {"primary_diagnosis": "Gout", "confidence": 60}"#;
        assert_eq!(parse_diagnosis_response(response).condition, "Gout");
    }

    #[test]
    fn test_braces_after_block_are_ignored() {
        let response = "{\"primary_diagnosis\": \"Migraine\", \"confidence\": 70}\nNote: dosing per {weight} guidance.";
        let outcome = parse_diagnosis_response(response);
        assert_eq!(outcome.condition, "Migraine");
        assert_eq!(outcome.confidence, 70.0);
        assert_eq!(outcome.source, OutcomeSource::Structured);
    }

    #[test]
    fn test_first_of_several_blocks_wins() {
        let response = r#"{"primary_diagnosis": "Migraine", "confidence": 70}
Alternative: {"primary_diagnosis": "Tension headache"}"#;
        let outcome = parse_diagnosis_response(response);
        assert_eq!(outcome.condition, "Migraine");
        assert_eq!(outcome.source, OutcomeSource::Structured);
    }

    #[test]
    fn test_missing_fields_default_to_neutral_values() {
        let outcome = parse_diagnosis_response("{}");
        assert_eq!(outcome.condition, UNDETERMINED_CONDITION);
        assert_eq!(outcome.confidence, 0.0);
        assert_eq!(outcome.reasoning, NO_REASONING);
        assert!(outcome.recommended_tests.is_empty());
        assert!(outcome.icd10_code.is_none());
        assert_eq!(outcome.source, OutcomeSource::Structured);
    }

    #[test]
    fn test_loosely_typed_fields() {
        let response = r#"{"primary_diagnosis": "Sepsis", "confidence": " 90 % ",
            "recommended_tests": "Blood cultures", "icd10_code": "", "red_flags": ["Hypotension", null, ""]}"#;
        let outcome = parse_diagnosis_response(response);
        assert_eq!(outcome.confidence, 90.0);
        assert_eq!(outcome.recommended_tests, vec!["Blood cultures".to_string()]);
        assert_eq!(outcome.red_flags, vec!["Hypotension".to_string()]);
        assert!(outcome.icd10_code.is_none());
    }

    #[test]
    fn test_no_block_falls_back() {
        let outcome = parse_diagnosis_response("The patient most likely has influenza.");
        assert_eq!(outcome.condition, UNSTRUCTURED_CONDITION);
        assert_eq!(outcome.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(outcome.reasoning, "The patient most likely has influenza.");
        assert!(!outcome.red_flags.is_empty());
    }

    #[test]
    fn test_malformed_block_falls_back() {
        let outcome = parse_diagnosis_response(r#"{"primary_diagnosis": "Asthma", "confidence": }"#);
        assert_eq!(outcome.source, OutcomeSource::Fallback);
        assert_eq!(outcome.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_wrongly_typed_block_falls_back() {
        let outcome = parse_diagnosis_response(r#"{"primary_diagnosis": ["a", "b"]}"#);
        assert_eq!(outcome.source, OutcomeSource::Fallback);
    }

    #[test]
    fn test_extract_json_block_none_without_object() {
        assert!(extract_json_block("no braces").is_none());
        assert!(extract_json_block("[1, 2, 3]").is_none());
        assert!(extract_json_block("} {").is_none());
    }
}
