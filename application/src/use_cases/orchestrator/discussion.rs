//! Post-hoc discussion simulation.

use super::{DiagnosticOrchestrator, OrchestratorError};
use council_domain::{
    ConversationEntry, DiagnosticSession, DiscussionScript, DomainError, MAX_DISCUSSION_ROUNDS,
    SessionId, entries_for_rounds,
};
use tracing::info;

impl DiagnosticOrchestrator {
    /// Append `rounds` rounds of templated deliberation to a completed session.
    ///
    /// `rounds` must lie in `1..=MAX_DISCUSSION_ROUNDS`, else
    /// [`OrchestratorError::InvalidRounds`] is returned before the session is
    /// touched. No reasoning calls are made and the status is left unchanged. The
    /// session must be `completed` with all three outcomes stored; otherwise
    /// the call fails with [`OrchestratorError::InvalidSessionState`] and the
    /// transcript is untouched.
    pub async fn simulate_case_discussion(
        &self,
        id: SessionId,
        rounds: u32,
    ) -> Result<DiagnosticSession, OrchestratorError> {
        if !(1..=MAX_DISCUSSION_ROUNDS).contains(&rounds) {
            return Err(OrchestratorError::InvalidRounds(rounds));
        }
        let lease = self.lease(id)?;

        let entries: Vec<ConversationEntry> = lease
            .read(|session| {
                let script = DiscussionScript::for_session(session)?;
                let mut entries = Vec::with_capacity(entries_for_rounds(rounds));
                for round in 1..=rounds {
                    entries.extend(script.round(round));
                }
                Ok::<_, DomainError>(entries)
            })
            .map_err(|_| OrchestratorError::not_found(id))?
            .map_err(|e| OrchestratorError::from_domain(id, e))?;

        info!(session_id = %id, rounds, entries = entries.len(), "Simulating case discussion");
        for entry in entries {
            self.append(&lease, entry)?;
        }

        lease
            .snapshot()
            .map_err(|e| OrchestratorError::pipeline(id, e))
    }
}
