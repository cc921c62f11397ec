//! Clinical agent
//!
//! Runs one role over a patient case: builds the prompt pair, calls the
//! reasoning service under a timeout and an optional cancellation token,
//! parses the reply and writes the audit record.
//!
//! [`ClinicalAgent::analyze_case`] never fails. Unusable replies fall back to
//! a degraded outcome, and gateway failures (including timeout and
//! cancellation) become a system-error outcome flagged for manual review.

use crate::config::DiagnosisParams;
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use council_domain::util::truncate_chars;
use council_domain::{
    AgentProfile, AgentRole, DiagnosisOutcome, PatientCase, RoleKind, parse_diagnosis_response,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors surfaced by [`ClinicalAgent::try_analyze`] and
/// [`ClinicalAgent::synthesize_consensus`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("The {0} role cannot synthesize a consensus")]
    SynthesisUnsupported(RoleKind),
}

/// A role bound to a reasoning service.
pub struct ClinicalAgent {
    role: Arc<dyn AgentRole>,
    gateway: Arc<dyn LlmGateway>,
    params: DiagnosisParams,
    audit_logger: Arc<dyn AuditLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl ClinicalAgent {
    pub fn new(
        role: Arc<dyn AgentRole>,
        gateway: Arc<dyn LlmGateway>,
        params: DiagnosisParams,
    ) -> Self {
        Self {
            role,
            gateway,
            params,
            audit_logger: Arc::new(NoAuditLogger),
            cancellation_token: None,
        }
    }

    /// Create with an audit logger.
    pub fn with_audit_logger(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.audit_logger = logger;
        self
    }

    /// Abort in-flight calls when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn role(&self) -> &dyn AgentRole {
        self.role.as_ref()
    }

    pub fn profile(&self) -> &AgentProfile {
        self.role.profile()
    }

    /// Produce an outcome for `case`. Always returns an outcome.
    pub async fn analyze_case(&self, case: &PatientCase, context: Option<&str>) -> DiagnosisOutcome {
        match self.try_analyze(case, context).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(agent = %self.profile().name, error = %e, "Diagnosis failed");
                let outcome = DiagnosisOutcome::system_error(&e);
                self.audit(case, &outcome);
                outcome
            }
        }
    }

    /// Like [`analyze_case`](Self::analyze_case) but surfaces gateway failures.
    ///
    /// Parse failures are still absorbed into a fallback outcome.
    pub async fn try_analyze(
        &self,
        case: &PatientCase,
        context: Option<&str>,
    ) -> Result<DiagnosisOutcome, AgentError> {
        let profile = self.profile();
        info!(agent = %profile.name, role = %profile.role, "Starting diagnosis");

        let preamble = self.role.instruction_preamble();
        let prompt = self.role.clinical_prompt(case, context);
        let raw = self.reason(&preamble, &prompt).await?;

        debug!(
            agent = %profile.name,
            bytes = raw.len(),
            "Response: {}",
            truncate_chars(&raw, 200)
        );

        let outcome = parse_diagnosis_response(&raw);
        if outcome.is_degraded() {
            warn!(agent = %profile.name, "No structured block in response, using fallback");
        }
        self.audit(case, &outcome);
        Ok(outcome)
    }

    /// Consensus pass over two prior outcomes.
    ///
    /// Fails only when the role has no synthesis capability; gateway
    /// failures still become a system-error outcome.
    pub async fn synthesize_consensus(
        &self,
        case: &PatientCase,
        primary: &DiagnosisOutcome,
        specialist: &DiagnosisOutcome,
    ) -> Result<DiagnosisOutcome, AgentError> {
        let context = self
            .role
            .synthesis_context(primary, specialist)
            .ok_or(AgentError::SynthesisUnsupported(self.role.kind()))?;
        Ok(self.analyze_case(case, Some(&context)).await)
    }

    /// One bounded, cancellable call to the reasoning service.
    async fn reason(&self, preamble: &str, prompt: &str) -> Result<String, GatewayError> {
        let call = async {
            let session = self
                .gateway
                .create_session(&self.params.model, preamble, self.params.generation())
                .await?;
            session.send(prompt).await
        };

        let bounded = async {
            match self.params.timeout {
                Some(timeout) => tokio::time::timeout(timeout, call)
                    .await
                    .map_err(|_| GatewayError::Timeout)?,
                None => call.await,
            }
        };

        let raw = match &self.cancellation_token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(GatewayError::Cancelled),
                    result = bounded => result?,
                }
            }
            None => bounded.await?,
        };

        if raw.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(raw)
    }

    fn audit(&self, case: &PatientCase, outcome: &DiagnosisOutcome) {
        let profile = self.profile();
        let patient_id = case.patient_id().unwrap_or_else(|| "unknown".to_string());

        info!(
            target: "audit",
            agent = %profile.name,
            role = %profile.role,
            patient_id = %patient_id,
            condition = %outcome.condition,
            confidence = outcome.confidence,
            "Diagnostic interaction"
        );

        self.audit_logger.log(AuditEvent::new(
            "diagnostic_interaction",
            serde_json::json!({
                "agent": profile.name,
                "role": profile.role,
                "patient_id": patient_id,
                "diagnosis": outcome.condition,
                "confidence": outcome.confidence,
                "source": outcome.source,
            }),
        ));
    }
}
