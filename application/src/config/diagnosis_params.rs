//! Diagnosis parameters — agent and pipeline control.
//!
//! [`DiagnosisParams`] groups the static parameters used by
//! [`ClinicalAgent`](crate::use_cases::clinical_agent::ClinicalAgent) and the
//! [`DiagnosticOrchestrator`](crate::use_cases::orchestrator::DiagnosticOrchestrator).
//! These are application-layer concerns, not domain policy.

use crate::ports::llm_gateway::GenerationParams;
use council_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default specialty consulted when a session does not name one.
pub const DEFAULT_SPECIALTY: &str = "Internal Medicine";

/// Agent and pipeline control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisParams {
    /// Model every agent talks to.
    pub model: Model,
    /// Sampling temperature; low for reproducible clinical reasoning.
    pub temperature: f64,
    /// Upper bound on generated tokens per call.
    pub max_tokens: u32,
    /// Per-call timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Specialty used when a session is started without one.
    pub default_specialty: String,
    /// Rounds appended by discussion simulation when none are requested.
    pub discussion_rounds: u32,
}

impl Default for DiagnosisParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: 0.1,
            max_tokens: 1500,
            timeout: Some(Duration::from_secs(60)),
            default_specialty: DEFAULT_SPECIALTY.to_string(),
            discussion_rounds: 2,
        }
    }
}

impl DiagnosisParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.default_specialty = specialty.into();
        self
    }

    pub fn with_discussion_rounds(mut self, rounds: u32) -> Self {
        self.discussion_rounds = rounds;
        self
    }

    /// Generation settings sent to the gateway.
    pub fn generation(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = DiagnosisParams::default();
        assert_eq!(params.temperature, 0.1);
        assert_eq!(params.max_tokens, 1500);
        assert_eq!(params.timeout, Some(Duration::from_secs(60)));
        assert_eq!(params.default_specialty, "Internal Medicine");
        assert_eq!(params.discussion_rounds, 2);
    }

    #[test]
    fn test_builder_chain() {
        let params = DiagnosisParams::default()
            .with_model(Model::Demo)
            .with_temperature(0.3)
            .with_max_tokens(800)
            .with_timeout(None)
            .with_default_specialty("Cardiology")
            .with_discussion_rounds(3);

        assert_eq!(params.model, Model::Demo);
        assert_eq!(params.generation().temperature, 0.3);
        assert_eq!(params.generation().max_tokens, 800);
        assert!(params.timeout.is_none());
        assert_eq!(params.default_specialty, "Cardiology");
        assert_eq!(params.discussion_rounds, 3);
    }
}
