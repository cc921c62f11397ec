//! Diagnosis outcome value object

use serde::{Deserialize, Serialize};

/// Condition reported when the reasoning service could not be used at all.
pub const SYSTEM_ERROR_CONDITION: &str = "System Error";

/// Red flag attached to every system-error outcome.
pub const SYSTEM_ERROR_RED_FLAG: &str = "System error - manual review required";

/// Condition reported when a response carried no well-formed structured block.
pub const UNSTRUCTURED_CONDITION: &str = "Unable to parse structured diagnosis";

/// Red flag attached to every fallback outcome.
pub const UNSTRUCTURED_RED_FLAG: &str = "Unstructured response - manual review required";

/// Neutral confidence assigned to fallback outcomes.
pub const FALLBACK_CONFIDENCE: f64 = 50.0;

/// Number of characters of the raw response kept as fallback reasoning.
pub const FALLBACK_REASONING_CHARS: usize = 500;

/// How an outcome was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeSource {
    /// Parsed from a well-formed structured block
    Structured,
    /// Degraded extraction from free text
    Fallback,
    /// The reasoning call failed, timed out or returned nothing usable
    SystemError,
}

/// Result of one agent's reasoning pass over a case (Value Object)
///
/// Confidence is a percentage in the intended range 0–100; it is carried
/// as reported and not clamped here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisOutcome {
    pub condition: String,
    pub confidence: f64,
    pub reasoning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icd10_code: Option<String>,
    #[serde(default)]
    pub recommended_tests: Vec<String>,
    #[serde(default)]
    pub differential_diagnoses: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
    pub source: OutcomeSource,
}

impl DiagnosisOutcome {
    /// Creates a structured outcome with empty lists.
    pub fn new(condition: impl Into<String>, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            confidence,
            reasoning: reasoning.into(),
            icd10_code: None,
            recommended_tests: Vec::new(),
            differential_diagnoses: Vec::new(),
            red_flags: Vec::new(),
            next_steps: None,
            source: OutcomeSource::Structured,
        }
    }

    /// Terminal outcome for a failed reasoning call.
    pub fn system_error(error: impl std::fmt::Display) -> Self {
        Self {
            source: OutcomeSource::SystemError,
            red_flags: vec![SYSTEM_ERROR_RED_FLAG.to_string()],
            ..Self::new(
                SYSTEM_ERROR_CONDITION,
                0.0,
                format!("Unable to complete diagnosis due to error: {}", error),
            )
        }
    }

    /// Degraded outcome for a response without a structured block.
    pub fn fallback(raw_response: &str) -> Self {
        let reasoning = crate::util::truncate_chars(raw_response.trim(), FALLBACK_REASONING_CHARS);
        Self {
            source: OutcomeSource::Fallback,
            red_flags: vec![UNSTRUCTURED_RED_FLAG.to_string()],
            ..Self::new(UNSTRUCTURED_CONDITION, FALLBACK_CONFIDENCE, reasoning)
        }
    }

    pub fn with_icd10_code(mut self, code: impl Into<String>) -> Self {
        self.icd10_code = Some(code.into());
        self
    }

    pub fn with_recommended_tests(mut self, tests: Vec<String>) -> Self {
        self.recommended_tests = tests;
        self
    }

    pub fn with_differential_diagnoses(mut self, differentials: Vec<String>) -> Self {
        self.differential_diagnoses = differentials;
        self
    }

    pub fn with_red_flags(mut self, red_flags: Vec<String>) -> Self {
        self.red_flags = red_flags;
        self
    }

    pub fn with_next_steps(mut self, next_steps: impl Into<String>) -> Self {
        self.next_steps = Some(next_steps.into());
        self
    }

    /// Returns `true` if the outcome needs a human before it can be acted on.
    pub fn is_degraded(&self) -> bool {
        self.source != OutcomeSource::Structured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_error_outcome() {
        let outcome = DiagnosisOutcome::system_error("connection refused");
        assert_eq!(outcome.condition, SYSTEM_ERROR_CONDITION);
        assert_eq!(outcome.confidence, 0.0);
        assert_eq!(outcome.red_flags, vec![SYSTEM_ERROR_RED_FLAG.to_string()]);
        assert!(outcome.reasoning.contains("connection refused"));
        assert!(outcome.is_degraded());
    }

    #[test]
    fn test_fallback_truncates_reasoning() {
        let raw = "x".repeat(FALLBACK_REASONING_CHARS + 200);
        let outcome = DiagnosisOutcome::fallback(&raw);
        assert_eq!(outcome.reasoning.chars().count(), FALLBACK_REASONING_CHARS);
        assert_eq!(outcome.confidence, FALLBACK_CONFIDENCE);
        assert!(!outcome.red_flags.is_empty());
        assert_eq!(outcome.source, OutcomeSource::Fallback);
    }

    #[test]
    fn test_builder_keeps_order() {
        let outcome = DiagnosisOutcome::new("Pneumonia", 80.0, "Fever and consolidation")
            .with_icd10_code("J18.9")
            .with_recommended_tests(vec!["Chest X-ray".into(), "CBC".into()]);
        assert_eq!(outcome.recommended_tests[0], "Chest X-ray");
        assert_eq!(outcome.icd10_code.as_deref(), Some("J18.9"));
        assert!(!outcome.is_degraded());
    }
}
