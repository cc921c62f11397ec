//! Domain layer for clinical-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! Three role-specialized agents deliberate over one patient case:
//!
//! - **Primary**: first-line assessment, common conditions first
//! - **Specialist**: expert opinion in the requested specialty
//! - **Senior**: reviews both assessments and settles the consensus
//!
//! ## Session
//!
//! A [`DiagnosticSession`] tracks the case through
//! `initialized → in_progress → {completed | error}`, holds one outcome slot
//! per [`Stage`] and an append-only transcript of [`ConversationEntry`]s.

pub mod agent;
pub mod case;
pub mod config;
pub mod core;
pub mod diagnosis;
pub mod discussion;
pub mod prompt;
pub mod session;
pub mod transcript;
pub mod util;

// Re-export commonly used types
pub use agent::{
    AgentProfile, AgentRole, PrimaryDiagnostician, RoleKind, SAFETY_GUIDELINES, SeniorReviewer,
    SpecialistConsultant,
};
pub use case::{CaseField, NOT_SPECIFIED, PatientCase};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::{DomainError, InvalidStateReason},
    model::Model,
};
pub use diagnosis::{DiagnosisOutcome, OutcomeSource, parse_diagnosis_response};
pub use discussion::{DiscussionScript, MAX_DISCUSSION_ROUNDS, entries_for_rounds};
pub use prompt::{ClinicalPromptTemplate, StageReportTemplate};
pub use session::{
    DiagnosticSession, SessionId, SessionStatus, SessionSummary, Stage, TimelineEntry,
};
pub use transcript::{ConversationEntry, MessageKind};
