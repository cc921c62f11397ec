//! Error types for the diagnostic orchestrator.

use crate::use_cases::session_registry::RegistryError;
use council_domain::{DomainError, InvalidStateReason, SessionId};
use thiserror::Error;

/// Errors surfaced by [`DiagnosticOrchestrator`](super::DiagnosticOrchestrator).
///
/// Reasoning failures never appear here: the agents absorb them into
/// degraded outcomes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrchestratorError {
    /// Caller misuse: unknown session, wrong status or missing outcome.
    #[error("Invalid session state for {session_id}: {reason}")]
    InvalidSessionState {
        session_id: SessionId,
        reason: InvalidStateReason,
    },

    /// Another operation on the same session is still running.
    #[error("Session {0} is busy with another operation")]
    SessionBusy(SessionId),

    #[error("Discussion rounds must be between 1 and {max} (got {0})", max = council_domain::MAX_DISCUSSION_ROUNDS)]
    InvalidRounds(u32),

    #[error("Session registration failed: {0}")]
    Registration(RegistryError),

    /// Unexpected failure inside the pipeline; the session is marked `error`.
    #[error("Diagnostic pipeline failed for {session_id}: {message}")]
    Pipeline {
        session_id: SessionId,
        message: String,
    },

    /// The pipeline was cancelled; the session is marked `error`.
    #[error("Diagnostic session {0} was cancelled")]
    Cancelled(SessionId),
}

impl OrchestratorError {
    /// Check if this error reports caller misuse rather than a failure
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, OrchestratorError::InvalidSessionState { .. })
    }

    pub(super) fn not_found(session_id: SessionId) -> Self {
        OrchestratorError::InvalidSessionState {
            session_id,
            reason: InvalidStateReason::SessionNotFound,
        }
    }

    pub(super) fn pipeline(session_id: SessionId, error: impl std::fmt::Display) -> Self {
        OrchestratorError::Pipeline {
            session_id,
            message: error.to_string(),
        }
    }

    /// Precondition violations stay caller errors; anything else is a pipeline failure.
    pub(super) fn from_domain(session_id: SessionId, error: DomainError) -> Self {
        match error {
            DomainError::InvalidSessionState(reason) => OrchestratorError::InvalidSessionState {
                session_id,
                reason,
            },
            other => Self::pipeline(session_id, other),
        }
    }

    /// Map a lease acquisition failure.
    pub(super) fn from_lease(error: RegistryError) -> Self {
        match error {
            RegistryError::NotFound(id) => Self::not_found(id),
            RegistryError::Busy(id) => OrchestratorError::SessionBusy(id),
            other => OrchestratorError::Registration(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lease_errors_map_to_caller_errors() {
        let id = SessionId::new();
        assert!(OrchestratorError::from_lease(RegistryError::NotFound(id)).is_invalid_state());
        assert_eq!(
            OrchestratorError::from_lease(RegistryError::Busy(id)),
            OrchestratorError::SessionBusy(id)
        );
        assert!(!OrchestratorError::pipeline(id, "boom").is_invalid_state());
    }
}
