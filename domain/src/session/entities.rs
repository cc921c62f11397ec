//! Diagnostic session aggregate

use crate::case::PatientCase;
use crate::core::error::{DomainError, InvalidStateReason};
use crate::diagnosis::DiagnosisOutcome;
use crate::transcript::ConversationEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Collision-resistant session identifier (random UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Lifecycle status: `initialized → in_progress → {completed | error}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Initialized,
    InProgress,
    Completed,
    Error,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Initialized => "initialized",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Error)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the three reasoning passes, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Primary,
    Specialist,
    Consensus,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Primary, Stage::Specialist, Stage::Consensus];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Primary => "primary",
            Stage::Specialist => "specialist",
            Stage::Consensus => "consensus",
        }
    }

    /// The stage whose outcome must already be stored before this one.
    pub fn requires(&self) -> Option<Stage> {
        match self {
            Stage::Primary => None,
            Stage::Specialist => Some(Stage::Primary),
            Stage::Consensus => Some(Stage::Specialist),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One patient case tracked through the three-stage pipeline (Aggregate Root)
///
/// Fields are private so the invariants hold for the lifetime of the value:
/// outcome slots fill in stage order, the transcript only grows, and
/// `completed_at` is set exactly when the status is `completed`.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticSession {
    id: SessionId,
    case: PatientCase,
    specialty: String,
    transcript: Vec<ConversationEntry>,
    primary: Option<DiagnosisOutcome>,
    specialist: Option<DiagnosisOutcome>,
    consensus: Option<DiagnosisOutcome>,
    status: SessionStatus,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl DiagnosticSession {
    pub fn new(id: SessionId, case: PatientCase, specialty: impl Into<String>) -> Self {
        Self {
            id,
            case,
            specialty: specialty.into(),
            transcript: Vec::new(),
            primary: None,
            specialist: None,
            consensus: None,
            status: SessionStatus::Initialized,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn case(&self) -> &PatientCase {
        &self.case
    }

    /// Specialty requested for the specialist consultation of this session.
    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn transcript(&self) -> &[ConversationEntry] {
        &self.transcript
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn outcome(&self, stage: Stage) -> Option<&DiagnosisOutcome> {
        match stage {
            Stage::Primary => self.primary.as_ref(),
            Stage::Specialist => self.specialist.as_ref(),
            Stage::Consensus => self.consensus.as_ref(),
        }
    }

    pub fn primary(&self) -> Option<&DiagnosisOutcome> {
        self.primary.as_ref()
    }

    pub fn specialist(&self) -> Option<&DiagnosisOutcome> {
        self.specialist.as_ref()
    }

    pub fn consensus(&self) -> Option<&DiagnosisOutcome> {
        self.consensus.as_ref()
    }

    /// Elapsed time between creation and completion.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.completed_at.map(|done| done - self.created_at)
    }

    /// `initialized → in_progress`
    pub fn begin(&mut self) -> Result<(), DomainError> {
        if self.status != SessionStatus::Initialized {
            return Err(DomainError::InvalidSessionState(
                InvalidStateReason::NotInitialized(self.status),
            ));
        }
        self.status = SessionStatus::InProgress;
        Ok(())
    }

    /// Append an entry to the transcript.
    ///
    /// The entry's timestamp is raised to the previous entry's timestamp if
    /// the clock went backwards, so the transcript stays ordered.
    pub fn record(&mut self, mut entry: ConversationEntry) -> &ConversationEntry {
        if let Some(last) = self.transcript.last()
            && entry.timestamp < last.timestamp
        {
            entry.timestamp = last.timestamp;
        }
        self.transcript.push(entry);
        &self.transcript[self.transcript.len() - 1]
    }

    /// Store a stage outcome, enforcing pipeline order.
    pub fn store_outcome(
        &mut self,
        stage: Stage,
        outcome: DiagnosisOutcome,
    ) -> Result<(), DomainError> {
        if self.status != SessionStatus::InProgress {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: SessionStatus::InProgress,
            });
        }
        if self.outcome(stage).is_some() {
            return Err(DomainError::StageAlreadyStored(stage));
        }
        if let Some(requires) = stage.requires()
            && self.outcome(requires).is_none()
        {
            return Err(DomainError::StageOutOfOrder { stage, requires });
        }

        let slot = match stage {
            Stage::Primary => &mut self.primary,
            Stage::Specialist => &mut self.specialist,
            Stage::Consensus => &mut self.consensus,
        };
        *slot = Some(outcome);
        Ok(())
    }

    /// `in_progress → completed`; requires all three outcomes.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if self.status != SessionStatus::InProgress {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: SessionStatus::Completed,
            });
        }
        if let Some(stage) = self.first_missing_stage() {
            return Err(DomainError::InvalidSessionState(
                InvalidStateReason::MissingOutcome(stage),
            ));
        }
        self.status = SessionStatus::Completed;
        self.completed_at = Some(Utc::now().max(self.created_at));
        Ok(())
    }

    /// `in_progress → error`
    pub fn fail(&mut self) -> Result<(), DomainError> {
        if self.status != SessionStatus::InProgress {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: SessionStatus::Error,
            });
        }
        self.status = SessionStatus::Error;
        Ok(())
    }

    /// Check the preconditions of discussion simulation: status is exactly
    /// `completed` and all three outcome slots are filled.
    pub fn ensure_discussable(&self) -> Result<(), DomainError> {
        if self.status != SessionStatus::Completed {
            return Err(DomainError::InvalidSessionState(
                InvalidStateReason::NotCompleted(self.status),
            ));
        }
        if let Some(stage) = self.first_missing_stage() {
            return Err(DomainError::InvalidSessionState(
                InvalidStateReason::MissingOutcome(stage),
            ));
        }
        Ok(())
    }

    fn first_missing_stage(&self) -> Option<Stage> {
        Stage::ALL.into_iter().find(|stage| self.outcome(*stage).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::MessageKind;
    use chrono::Duration;

    fn session() -> DiagnosticSession {
        DiagnosticSession::new(SessionId::new(), PatientCase::new(), "Internal Medicine")
    }

    fn outcome(condition: &str) -> DiagnosisOutcome {
        DiagnosisOutcome::new(condition, 75.0, "reasoning")
    }

    fn completed_session() -> DiagnosticSession {
        let mut session = session();
        session.begin().unwrap();
        for stage in Stage::ALL {
            session.store_outcome(stage, outcome("ACS")).unwrap();
        }
        session.complete().unwrap();
        session
    }

    #[test]
    fn test_new_session_is_initialized() {
        let session = session();
        assert_eq!(session.status(), SessionStatus::Initialized);
        assert!(session.transcript().is_empty());
        assert!(session.completed_at().is_none());
        assert_eq!(session.specialty(), "Internal Medicine");
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
        let id = SessionId::new();
        assert_eq!(id.to_string().parse::<SessionId>().unwrap(), id);
    }

    #[test]
    fn test_begin_only_from_initialized() {
        let mut session = session();
        session.begin().unwrap();
        assert_eq!(session.status(), SessionStatus::InProgress);

        let err = session.begin().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidSessionState(InvalidStateReason::NotInitialized(
                SessionStatus::InProgress
            ))
        );
    }

    #[test]
    fn test_store_outcome_enforces_order() {
        let mut session = session();
        session.begin().unwrap();

        let err = session
            .store_outcome(Stage::Specialist, outcome("x"))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::StageOutOfOrder {
                stage: Stage::Specialist,
                requires: Stage::Primary
            }
        );

        session.store_outcome(Stage::Primary, outcome("a")).unwrap();
        let err = session
            .store_outcome(Stage::Consensus, outcome("x"))
            .unwrap_err();
        assert!(matches!(err, DomainError::StageOutOfOrder { .. }));

        let err = session.store_outcome(Stage::Primary, outcome("b")).unwrap_err();
        assert_eq!(err, DomainError::StageAlreadyStored(Stage::Primary));
        assert_eq!(session.primary().unwrap().condition, "a");
    }

    #[test]
    fn test_store_outcome_requires_in_progress() {
        let mut session = session();
        assert!(session.store_outcome(Stage::Primary, outcome("a")).is_err());
        assert!(session.primary().is_none());
    }

    #[test]
    fn test_complete_sets_timestamp() {
        let session = completed_session();
        assert_eq!(session.status(), SessionStatus::Completed);
        let completed_at = session.completed_at().unwrap();
        assert!(completed_at >= session.created_at());
        assert!(session.duration().unwrap() >= Duration::zero());
    }

    #[test]
    fn test_complete_requires_all_outcomes() {
        let mut session = session();
        session.begin().unwrap();
        session.store_outcome(Stage::Primary, outcome("a")).unwrap();
        let err = session.complete().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidSessionState(InvalidStateReason::MissingOutcome(
                Stage::Specialist
            ))
        );
        assert!(session.completed_at().is_none());
    }

    #[test]
    fn test_fail_is_terminal() {
        let mut session = session();
        session.begin().unwrap();
        session.fail().unwrap();
        assert_eq!(session.status(), SessionStatus::Error);
        assert!(session.status().is_terminal());
        assert!(session.completed_at().is_none());
        assert!(session.complete().is_err());
        assert!(session.begin().is_err());
    }

    #[test]
    fn test_record_keeps_timestamps_ordered() {
        let mut session = session();
        let first = ConversationEntry::system("first");
        let first_ts = first.timestamp;
        session.record(first);

        let mut earlier = ConversationEntry::system("second");
        earlier.timestamp = first_ts - Duration::seconds(5);
        let recorded = session.record(earlier);
        assert_eq!(recorded.timestamp, first_ts);
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].kind, MessageKind::System);
    }

    #[test]
    fn test_ensure_discussable() {
        assert!(completed_session().ensure_discussable().is_ok());

        let mut in_progress = session();
        in_progress.begin().unwrap();
        let err = in_progress.ensure_discussable().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidSessionState(InvalidStateReason::NotCompleted(
                SessionStatus::InProgress
            ))
        );
    }

    #[test]
    fn test_status_display_is_snake_case() {
        assert_eq!(SessionStatus::InProgress.to_string(), "in_progress");
        assert_eq!(Stage::Consensus.to_string(), "consensus");
    }
}
