//! Role variants: primary care, specialist consultant and senior reviewer

use super::profile::AgentProfile;
use super::role::{AgentRole, RoleKind};
use crate::diagnosis::DiagnosisOutcome;
use crate::prompt::ClinicalPromptTemplate;

/// First-line assessment favouring common conditions and referral guidance.
#[derive(Debug, Clone)]
pub struct PrimaryDiagnostician {
    profile: AgentProfile,
}

impl PrimaryDiagnostician {
    pub fn new() -> Self {
        Self {
            profile: AgentProfile::new(
                "Dr. Primary",
                "Primary Care Physician",
                Some("Family Medicine".to_string()),
            ),
        }
    }
}

impl Default for PrimaryDiagnostician {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentRole for PrimaryDiagnostician {
    fn kind(&self) -> RoleKind {
        RoleKind::Primary
    }

    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn focus(&self) -> String {
        r#"As a Primary Care Physician, your focus is on:
1. Common medical conditions and their presentations
2. Appropriate screening and preventive care
3. When to refer to specialists
4. Cost-effective diagnostic approaches
5. Patient education and counseling

Consider the most common diagnoses first (horses, not zebras) unless red flags suggest otherwise."#
            .to_string()
    }
}

/// Expert opinion in one specialty, emphasising advanced and rare differentials.
#[derive(Debug, Clone)]
pub struct SpecialistConsultant {
    profile: AgentProfile,
}

impl SpecialistConsultant {
    /// The display name is derived from the specialty, e.g. "Dr. InternalMedicine".
    pub fn new(specialty: impl Into<String>) -> Self {
        let specialty = specialty.into();
        let name = format!("Dr. {}", specialty.replace(' ', ""));
        Self {
            profile: AgentProfile::new(name, "Specialist Consultant", Some(specialty)),
        }
    }

    pub fn specialty(&self) -> &str {
        self.profile.specialty_or_general()
    }
}

impl AgentRole for SpecialistConsultant {
    fn kind(&self) -> RoleKind {
        RoleKind::Specialist
    }

    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn focus(&self) -> String {
        format!(
            r#"As a {} Specialist, your expertise includes:
1. Complex and rare conditions in your specialty
2. Advanced diagnostic procedures and interpretation
3. Specialized treatment protocols
4. Latest research and clinical guidelines in your field
5. Subspecialty referrals when needed

Consider both common and uncommon conditions within your specialty.
Provide detailed rationale for advanced testing or procedures."#,
            self.specialty()
        )
    }
}

/// Attending physician who reviews both prior assessments and settles the consensus.
#[derive(Debug, Clone)]
pub struct SeniorReviewer {
    profile: AgentProfile,
}

impl SeniorReviewer {
    pub fn new() -> Self {
        Self {
            profile: AgentProfile::new(
                "Dr. Senior",
                "Senior Attending Physician",
                Some("Internal Medicine".to_string()),
            ),
        }
    }
}

impl Default for SeniorReviewer {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentRole for SeniorReviewer {
    fn kind(&self) -> RoleKind {
        RoleKind::Senior
    }

    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    fn focus(&self) -> String {
        r#"As a Senior Attending Physician, your role is to:
1. Review and synthesize input from other physicians
2. Identify potential gaps in reasoning or missed diagnoses
3. Provide teaching points and clinical pearls
4. Ensure patient safety and quality of care
5. Make final diagnostic recommendations

Consider all perspectives presented and weigh the evidence carefully.
Provide clear reasoning for your final assessment.
Highlight any areas where additional information would be helpful."#
            .to_string()
    }

    fn synthesis_context(
        &self,
        primary: &DiagnosisOutcome,
        specialist: &DiagnosisOutcome,
    ) -> Option<String> {
        Some(ClinicalPromptTemplate::consensus_context(primary, specialist))
    }
}
