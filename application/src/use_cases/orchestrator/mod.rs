//! Diagnostic orchestrator use case
//!
//! Drives the three-stage pipeline over a [`DiagnosticSession`]:
//!
//! ```text
//! start_session ──► run_diagnostic_process
//!                     ├─ Primary      (case)
//!                     ├─ Specialist   (case + primary outcome)
//!                     └─ Consensus    (case + primary + specialist outcomes)
//!                   ──► simulate_case_discussion (optional, completed sessions only)
//! ```
//!
//! Stages run strictly in sequence; each reads the previous slot back from
//! the session. Operations on one session hold a [`SessionLease`], so a
//! second concurrent call on the same id fails with
//! [`OrchestratorError::SessionBusy`] while other sessions proceed.
//!
//! # Module Structure
//!
//! - `pipeline` — the three stages and the lifecycle transitions
//! - `discussion` — post-hoc discussion simulation
//! - `types` — error types

mod discussion;
mod pipeline;
mod types;

pub use types::OrchestratorError;

use crate::config::DiagnosisParams;
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::clinical_agent::ClinicalAgent;
use crate::use_cases::session_registry::{SessionLease, SessionRegistry};
use council_domain::{
    ConversationEntry, DiagnosticSession, PatientCase, RoleKind, SessionId, SessionSummary,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Use case for running diagnostic sessions
pub struct DiagnosticOrchestrator {
    gateway: Arc<dyn LlmGateway>,
    params: DiagnosisParams,
    registry: Arc<SessionRegistry>,
    audit_logger: Arc<dyn AuditLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl DiagnosticOrchestrator {
    pub fn new(gateway: Arc<dyn LlmGateway>, params: DiagnosisParams) -> Self {
        Self {
            gateway,
            params,
            registry: Arc::new(SessionRegistry::new()),
            audit_logger: Arc::new(NoAuditLogger),
            cancellation_token: None,
        }
    }

    /// Use an externally owned registry (shared with UI or report surfaces).
    pub fn with_registry(mut self, registry: Arc<SessionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Create with an audit logger.
    pub fn with_audit_logger(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.audit_logger = logger;
        self
    }

    /// Cancel in-flight pipelines when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn params(&self) -> &DiagnosisParams {
        &self.params
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Create and register a session; returns its identifier.
    ///
    /// `specialty` selects the specialist consulted for this session only,
    /// defaulting to [`DiagnosisParams::default_specialty`].
    pub async fn start_session(
        &self,
        case: PatientCase,
        specialty: Option<&str>,
    ) -> Result<SessionId, OrchestratorError> {
        let specialty = specialty
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.params.default_specialty.as_str());

        let session = DiagnosticSession::new(SessionId::new(), case, specialty);
        let id = self
            .registry
            .register(session)
            .map_err(OrchestratorError::Registration)?;

        info!(session_id = %id, specialty = %specialty, "Started diagnostic session");
        Ok(id)
    }

    /// Start a session and run the full pipeline on it.
    pub async fn diagnose(
        &self,
        case: PatientCase,
        specialty: Option<&str>,
    ) -> Result<DiagnosticSession, OrchestratorError> {
        let id = self.start_session(case, specialty).await?;
        self.run_diagnostic_process(id).await
    }

    /// Snapshot of a session, or `None` if unknown.
    pub fn get_session(&self, id: SessionId) -> Option<DiagnosticSession> {
        self.registry.get(id)
    }

    /// Snapshots of every session, oldest first.
    pub fn list_sessions(&self) -> Vec<DiagnosticSession> {
        self.registry.list()
    }

    pub async fn generate_summary(&self, id: SessionId) -> Result<SessionSummary, OrchestratorError> {
        self.registry
            .get(id)
            .map(|session| SessionSummary::from(&session))
            .ok_or_else(|| OrchestratorError::not_found(id))
    }

    fn lease(&self, id: SessionId) -> Result<SessionLease, OrchestratorError> {
        self.registry.lease(id).map_err(OrchestratorError::from_lease)
    }

    fn agent(&self, kind: RoleKind, specialty: &str) -> ClinicalAgent {
        let agent = ClinicalAgent::new(
            kind.build(specialty),
            Arc::clone(&self.gateway),
            self.params.clone(),
        )
        .with_audit_logger(Arc::clone(&self.audit_logger));

        match &self.cancellation_token {
            Some(token) => agent.with_cancellation(token.clone()),
            None => agent,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Append to the transcript and audit the entry.
    fn append(&self, lease: &SessionLease, entry: ConversationEntry) -> Result<(), OrchestratorError> {
        let session_id = lease.id();
        let payload = serde_json::json!({
            "session_id": session_id.to_string(),
            "agent": entry.agent_name,
            "role": entry.agent_role,
            "kind": entry.kind,
            "confidence": entry.confidence,
        });

        lease
            .update(|session| {
                session.record(entry);
            })
            .map_err(|e| OrchestratorError::pipeline(session_id, e))?;

        self.audit_logger
            .log(AuditEvent::new("transcript_entry", payload));
        Ok(())
    }
}
