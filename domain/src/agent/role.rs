//! Role capability interface
//!
//! Every reasoning role turns a [`PatientCase`] (plus optional peer context)
//! into a prompt pair: an instruction preamble and a clinical prompt. Roles
//! that can combine two prior outcomes expose [`AgentRole::synthesis_context`].

use super::guidelines::SAFETY_GUIDELINES;
use super::profile::AgentProfile;
use super::roles::{PrimaryDiagnostician, SeniorReviewer, SpecialistConsultant};
use crate::case::PatientCase;
use crate::diagnosis::DiagnosisOutcome;
use crate::prompt::ClinicalPromptTemplate;
use crate::session::entities::Stage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which role variant an agent plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Primary,
    Specialist,
    Senior,
}

impl RoleKind {
    /// Pipeline stage this role is responsible for.
    pub fn stage(&self) -> Stage {
        match self {
            RoleKind::Primary => Stage::Primary,
            RoleKind::Specialist => Stage::Specialist,
            RoleKind::Senior => Stage::Consensus,
        }
    }

    /// Build the role variant. Only the specialist uses `specialty`.
    pub fn build(self, specialty: &str) -> Arc<dyn AgentRole> {
        match self {
            RoleKind::Primary => Arc::new(PrimaryDiagnostician::new()),
            RoleKind::Specialist => Arc::new(SpecialistConsultant::new(specialty)),
            RoleKind::Senior => Arc::new(SeniorReviewer::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Primary => "primary",
            RoleKind::Specialist => "specialist",
            RoleKind::Senior => "senior",
        }
    }
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capability interface implemented by every role variant.
pub trait AgentRole: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> RoleKind;

    fn profile(&self) -> &AgentProfile;

    /// Role-specific emphasis appended to the shared preamble.
    fn focus(&self) -> String;

    fn instruction_preamble(&self) -> String {
        format!(
            "{}\n\n{}",
            ClinicalPromptTemplate::base_preamble(self.profile(), &SAFETY_GUIDELINES),
            self.focus()
        )
    }

    fn clinical_prompt(&self, case: &PatientCase, context: Option<&str>) -> String {
        ClinicalPromptTemplate::clinical_prompt(case, context)
    }

    /// Peer context for a consensus pass over two prior outcomes.
    ///
    /// Returns `None` for roles that cannot synthesize.
    fn synthesis_context(
        &self,
        _primary: &DiagnosisOutcome,
        _specialist: &DiagnosisOutcome,
    ) -> Option<String> {
        None
    }
}
