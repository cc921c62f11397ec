//! Domain error types

use crate::session::entities::{SessionStatus, Stage};
use thiserror::Error;

/// Which precondition of a session operation was not met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidStateReason {
    /// No session is registered under the requested identifier
    SessionNotFound,
    /// The operation requires a `completed` session
    NotCompleted(SessionStatus),
    /// The pipeline can only start from `initialized`
    NotInitialized(SessionStatus),
    /// An outcome slot that the operation reads is still empty
    MissingOutcome(Stage),
}

impl std::fmt::Display for InvalidStateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionNotFound => write!(f, "session not found"),
            Self::NotCompleted(status) => {
                write!(f, "session must be completed (current status: {})", status)
            }
            Self::NotInitialized(status) => {
                write!(f, "session must be initialized (current status: {})", status)
            }
            Self::MissingOutcome(stage) => write!(f, "{} outcome is missing", stage),
        }
    }
}

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid session state: {0}")]
    InvalidSessionState(InvalidStateReason),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },

    #[error("Cannot store {stage} outcome before {requires} outcome")]
    StageOutOfOrder { stage: Stage, requires: Stage },

    #[error("{0} outcome has already been stored")]
    StageAlreadyStored(Stage),
}

impl DomainError {
    /// Check if this error reports a violated session precondition
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, DomainError::InvalidSessionState(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_display_names_the_condition() {
        let error = DomainError::InvalidSessionState(InvalidStateReason::NotCompleted(
            SessionStatus::InProgress,
        ));
        assert_eq!(
            error.to_string(),
            "Invalid session state: session must be completed (current status: in_progress)"
        );

        let error =
            DomainError::InvalidSessionState(InvalidStateReason::MissingOutcome(Stage::Consensus));
        assert!(error.to_string().contains("consensus outcome is missing"));
    }

    #[test]
    fn test_is_invalid_state_check() {
        assert!(
            DomainError::InvalidSessionState(InvalidStateReason::SessionNotFound)
                .is_invalid_state()
        );
        assert!(
            !DomainError::StageOutOfOrder {
                stage: Stage::Specialist,
                requires: Stage::Primary,
            }
            .is_invalid_state()
        );
    }
}
