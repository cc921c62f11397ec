//! Read-only session summary projection

use super::entities::{DiagnosticSession, SessionId, SessionStatus, Stage};
use crate::case::CaseField;
use crate::diagnosis::DiagnosisOutcome;
use crate::transcript::MessageKind;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Patient basics shown at the top of a summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientInfo {
    pub age: String,
    pub sex: String,
    pub chief_complaint: String,
}

/// One transcript entry without its content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub agent: String,
    pub role: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub confidence: Option<f64>,
}

/// Condition and confidence of one outcome slot; both `None` when empty
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OutcomeSummary {
    pub condition: Option<String>,
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icd10_code: Option<String>,
}

impl OutcomeSummary {
    fn of(outcome: Option<&DiagnosisOutcome>) -> Self {
        outcome
            .map(|o| Self {
                condition: Some(o.condition.clone()),
                confidence: Some(o.confidence),
                icd10_code: None,
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosesSummary {
    pub primary_care: OutcomeSummary,
    pub specialist: OutcomeSummary,
    pub final_consensus: OutcomeSummary,
}

/// Projection of a session for UI and report collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub patient_info: PatientInfo,
    pub specialty: String,
    pub diagnostic_timeline: Vec<TimelineEntry>,
    pub diagnoses: DiagnosesSummary,
    pub status: SessionStatus,
    /// Seconds between creation and completion; `None` until completed
    pub duration: Option<f64>,
}

impl From<&DiagnosticSession> for SessionSummary {
    fn from(session: &DiagnosticSession) -> Self {
        let case = session.case();
        let consensus = session.outcome(Stage::Consensus);

        Self {
            session_id: session.id(),
            patient_info: PatientInfo {
                age: case.text_or_placeholder(CaseField::Age),
                sex: case.text_or_placeholder(CaseField::Sex),
                chief_complaint: case.text_or_placeholder(CaseField::ChiefComplaint),
            },
            specialty: session.specialty().to_string(),
            diagnostic_timeline: session
                .transcript()
                .iter()
                .map(|entry| TimelineEntry {
                    agent: entry.agent_name.clone(),
                    role: entry.agent_role.clone(),
                    timestamp: entry.timestamp,
                    kind: entry.kind,
                    confidence: entry.confidence,
                })
                .collect(),
            diagnoses: DiagnosesSummary {
                primary_care: OutcomeSummary::of(session.outcome(Stage::Primary)),
                specialist: OutcomeSummary::of(session.outcome(Stage::Specialist)),
                final_consensus: OutcomeSummary {
                    icd10_code: consensus.and_then(|o| o.icd10_code.clone()),
                    ..OutcomeSummary::of(consensus)
                },
            },
            status: session.status(),
            duration: session
                .duration()
                .map(|d| d.num_milliseconds() as f64 / 1000.0),
        }
    }
}
