//! The three-stage diagnostic pipeline.

use super::{DiagnosticOrchestrator, OrchestratorError};
use crate::ports::audit_logger::AuditEvent;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::clinical_agent::{AgentError, ClinicalAgent};
use crate::use_cases::session_registry::SessionLease;
use council_domain::prompt::{SESSION_COMPLETED, SESSION_STARTED};
use council_domain::{
    ClinicalPromptTemplate, ConversationEntry, DiagnosisOutcome, DiagnosticSession,
    InvalidStateReason, MessageKind, RoleKind, SessionId, Stage, StageReportTemplate,
};
use std::future::Future;
use tracing::{error, info};

impl DiagnosticOrchestrator {
    /// Run the pipeline with default (no-op) progress
    pub async fn run_diagnostic_process(
        &self,
        id: SessionId,
    ) -> Result<DiagnosticSession, OrchestratorError> {
        self.run_with_progress(id, &NoProgress).await
    }

    /// Run the pipeline with progress callbacks
    ///
    /// The session must be `initialized`. On success it is `completed` with
    /// all three outcomes stored. Any failure past the start is recorded in
    /// the transcript, the session is marked `error`, and the error is
    /// returned.
    pub async fn run_with_progress(
        &self,
        id: SessionId,
        progress: &dyn ProgressNotifier,
    ) -> Result<DiagnosticSession, OrchestratorError> {
        let lease = self.lease(id)?;

        lease
            .update(|session| session.begin())
            .map_err(|e| OrchestratorError::pipeline(id, e))?
            .map_err(|e| OrchestratorError::from_domain(id, e))?;

        info!(session_id = %id, "Starting diagnostic process");

        let result = async {
            self.append(&lease, ConversationEntry::system(SESSION_STARTED))?;
            self.run_stages(&lease, progress).await?;
            self.finish(&lease)
        }
        .await;

        match result {
            Ok(session) => {
                info!(session_id = %id, "Completed diagnostic session");
                progress.on_session_complete(&session);
                Ok(session)
            }
            Err(e) => {
                error!(session_id = %id, error = %e, "Error in diagnostic session");
                self.record_failure(&lease, &e);
                if let Ok(session) = lease.snapshot() {
                    progress.on_session_complete(&session);
                }
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        lease: &SessionLease,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), OrchestratorError> {
        let id = lease.id();
        let (case, specialty) = lease
            .read(|s| (s.case().clone(), s.specialty().to_string()))
            .map_err(|e| OrchestratorError::pipeline(id, e))?;

        // Stage 1: primary assessment
        let primary_agent = self.agent(RoleKind::Primary, &specialty);
        self.run_stage(
            lease,
            Stage::Primary,
            &primary_agent,
            &specialty,
            progress,
            async { Ok(primary_agent.analyze_case(&case, None).await) },
        )
        .await?;

        // Stage 2: specialist consultation with the primary outcome as context
        let primary = self.stored_outcome(lease, Stage::Primary)?;
        let context = ClinicalPromptTemplate::primary_context(&primary);
        let specialist_agent = self.agent(RoleKind::Specialist, &specialty);
        self.run_stage(
            lease,
            Stage::Specialist,
            &specialist_agent,
            &specialty,
            progress,
            async { Ok(specialist_agent.analyze_case(&case, Some(&context)).await) },
        )
        .await?;

        // Stage 3: senior consensus over both prior outcomes
        let specialist = self.stored_outcome(lease, Stage::Specialist)?;
        let senior_agent = self.agent(RoleKind::Senior, &specialty);
        self.run_stage(
            lease,
            Stage::Consensus,
            &senior_agent,
            &specialty,
            progress,
            senior_agent.synthesize_consensus(&case, &primary, &specialist),
        )
        .await?;

        Ok(())
    }

    /// Announce, reason, report, store.
    async fn run_stage(
        &self,
        lease: &SessionLease,
        stage: Stage,
        agent: &ClinicalAgent,
        specialty: &str,
        progress: &dyn ProgressNotifier,
        reasoning: impl Future<Output = Result<DiagnosisOutcome, AgentError>>,
    ) -> Result<DiagnosisOutcome, OrchestratorError> {
        let id = lease.id();
        self.ensure_not_cancelled(id)?;

        let profile = agent.profile();
        let kind = stage_message_kind(stage);
        info!(session_id = %id, stage = %stage, agent = %profile.name, "Stage started");
        progress.on_stage_start(stage, profile);

        self.append(
            lease,
            ConversationEntry::from_profile(
                profile,
                kind,
                StageReportTemplate::announcement(stage, specialty),
            ),
        )?;

        let outcome = reasoning
            .await
            .map_err(|e| OrchestratorError::pipeline(id, e))?;
        self.ensure_not_cancelled(id)?;

        self.append(
            lease,
            ConversationEntry::from_profile(
                profile,
                kind,
                StageReportTemplate::report(stage, &outcome),
            )
            .with_confidence(outcome.confidence),
        )?;

        lease
            .update(|session| session.store_outcome(stage, outcome.clone()))
            .map_err(|e| OrchestratorError::pipeline(id, e))?
            .map_err(|e| OrchestratorError::pipeline(id, e))?;

        info!(
            session_id = %id,
            stage = %stage,
            condition = %outcome.condition,
            confidence = outcome.confidence,
            "Stage complete"
        );
        self.audit_logger.log(AuditEvent::new(
            "stage_completed",
            serde_json::json!({
                "session_id": id.to_string(),
                "stage": stage,
                "agent": profile.name,
                "condition": outcome.condition,
                "confidence": outcome.confidence,
                "source": outcome.source,
            }),
        ));
        progress.on_stage_complete(stage, &outcome);

        Ok(outcome)
    }

    /// Read a stored outcome back; the next stage builds its context from it.
    fn stored_outcome(
        &self,
        lease: &SessionLease,
        stage: Stage,
    ) -> Result<DiagnosisOutcome, OrchestratorError> {
        let id = lease.id();
        lease
            .read(|s| s.outcome(stage).cloned())
            .map_err(|e| OrchestratorError::pipeline(id, e))?
            .ok_or_else(|| {
                OrchestratorError::pipeline(id, InvalidStateReason::MissingOutcome(stage))
            })
    }

    /// `in_progress → completed`, then the closing system entry.
    fn finish(&self, lease: &SessionLease) -> Result<DiagnosticSession, OrchestratorError> {
        let id = lease.id();
        lease
            .update(|session| session.complete())
            .map_err(|e| OrchestratorError::pipeline(id, e))?
            .map_err(|e| OrchestratorError::pipeline(id, e))?;
        self.append(lease, ConversationEntry::system(SESSION_COMPLETED))?;
        lease
            .snapshot()
            .map_err(|e| OrchestratorError::pipeline(id, e))
    }

    /// `in_progress → error` with a system entry describing the failure.
    fn record_failure(&self, lease: &SessionLease, failure: &OrchestratorError) {
        let entry = ConversationEntry::system(StageReportTemplate::session_failed(failure));
        let recorded = lease.update(|session| {
            if let Err(e) = session.fail() {
                error!(session_id = %session.id(), error = %e, "Could not mark session as failed");
            }
            session.record(entry);
        });
        if let Err(e) = recorded {
            error!(error = %e, "Could not record pipeline failure");
        }
    }

    fn ensure_not_cancelled(&self, id: SessionId) -> Result<(), OrchestratorError> {
        if self.is_cancelled() {
            return Err(OrchestratorError::Cancelled(id));
        }
        Ok(())
    }
}

fn stage_message_kind(stage: Stage) -> MessageKind {
    match stage {
        Stage::Primary | Stage::Specialist => MessageKind::Analysis,
        Stage::Consensus => MessageKind::Consensus,
    }
}
