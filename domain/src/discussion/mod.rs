//! Discussion simulation
//!
//! Deterministic deliberation turns appended to a completed session. Every
//! text is templated from the case and the stored outcomes; no reasoning
//! service is involved.
//!
//! Each round yields a moderator opening, a primary question, a specialist
//! response and a senior synthesis. The first round adds a follow-up
//! question and a risk-focused response. Templates are keyed by round and
//! clamp to the last one once rounds run past them.

use crate::agent::{AgentProfile, RoleKind};
use crate::case::{CaseField, PatientCase};
use crate::core::error::{DomainError, InvalidStateReason};
use crate::diagnosis::DiagnosisOutcome;
use crate::session::entities::{DiagnosticSession, Stage};
use crate::transcript::{ConversationEntry, MessageKind};
use crate::util::join_first;

/// Entries appended by round 1.
pub const FIRST_ROUND_ENTRIES: usize = 6;
/// Entries appended by every later round.
pub const LATER_ROUND_ENTRIES: usize = 4;
/// Upper bound on rounds per discussion request.
pub const MAX_DISCUSSION_ROUNDS: u32 = 10;

/// Number of entries `rounds` rounds append.
pub fn entries_for_rounds(rounds: u32) -> usize {
    match rounds {
        0 => 0,
        r => FIRST_ROUND_ENTRIES + LATER_ROUND_ENTRIES * (r as usize - 1),
    }
}

/// Round texts for one completed session
#[derive(Debug)]
pub struct DiscussionScript<'a> {
    case: &'a PatientCase,
    specialty: &'a str,
    primary: &'a DiagnosisOutcome,
    specialist: &'a DiagnosisOutcome,
    primary_profile: AgentProfile,
    specialist_profile: AgentProfile,
    senior_profile: AgentProfile,
}

impl<'a> DiscussionScript<'a> {
    /// Fails with an invalid-state error unless the session is completed
    /// with all three outcomes stored.
    pub fn for_session(session: &'a DiagnosticSession) -> Result<Self, DomainError> {
        session.ensure_discussable()?;

        let missing =
            |stage| DomainError::InvalidSessionState(InvalidStateReason::MissingOutcome(stage));
        let primary = session.primary().ok_or_else(|| missing(Stage::Primary))?;
        let specialist = session
            .specialist()
            .ok_or_else(|| missing(Stage::Specialist))?;

        let specialty = session.specialty();
        let profile = |kind: RoleKind| kind.build(specialty).profile().clone();

        Ok(Self {
            case: session.case(),
            specialty,
            primary,
            specialist,
            primary_profile: profile(RoleKind::Primary),
            specialist_profile: profile(RoleKind::Specialist),
            senior_profile: profile(RoleKind::Senior),
        })
    }

    /// Entries for round `round` (1-based), in append order.
    pub fn round(&self, round: u32) -> Vec<ConversationEntry> {
        let index = round.saturating_sub(1).min(2) as usize;

        let mut entries = vec![
            ConversationEntry::from_profile(
                &AgentProfile::moderator(),
                MessageKind::Discussion,
                format!(
                    "**Discussion Round {}**\n\nLet's review the case and discuss any concerns or alternative perspectives...",
                    round
                ),
            ),
            ConversationEntry::from_profile(
                &self.primary_profile,
                MessageKind::Question,
                self.primary_question(index),
            ),
            ConversationEntry::from_profile(
                &self.specialist_profile,
                MessageKind::Response,
                self.specialist_response(index),
            ),
            ConversationEntry::from_profile(
                &self.senior_profile,
                MessageKind::Consensus,
                self.senior_guidance(index),
            ),
        ];

        if round == 1 {
            entries.push(ConversationEntry::from_profile(
                &self.primary_profile,
                MessageKind::Question,
                self.follow_up_question(),
            ));
            entries.push(ConversationEntry::from_profile(
                &self.specialist_profile,
                MessageKind::Response,
                self.risk_response(),
            ));
        }
        entries
    }

    fn field_or(&self, field: CaseField, fallback: &str) -> String {
        self.case.text_or(field, fallback)
    }

    fn symptoms(&self, fallback: &str) -> String {
        join_first(&self.case.symptoms(), 2, fallback)
    }

    fn primary_question(&self, index: usize) -> String {
        match index {
            0 => format!(
                "{}, I'm concerned about the differential diagnosis. Given the patient's {}, should we consider {}?",
                self.specialist_profile.name,
                self.field_or(CaseField::ChiefComplaint, "presentation"),
                join_first(&self.primary.differential_diagnoses, 2, "alternative diagnoses"),
            ),
            1 => format!(
                "The patient's {} could also suggest other conditions. What's your take on the urgency of further testing?",
                self.symptoms("symptoms"),
            ),
            _ => "I notice the confidence levels differ between our assessments. Can you help me understand the key differentiating factors you're considering?".to_string(),
        }
    }

    fn specialist_response(&self, index: usize) -> String {
        let dx = self.specialist;
        match index {
            0 => format!(
                "Good point, {}. In my {} practice, the constellation of symptoms - particularly {} - is most consistent with {}. The {} supports this diagnosis. However, I agree we should monitor for {}.",
                self.primary_profile.name,
                self.specialty,
                self.symptoms("the presenting symptoms"),
                dx.condition,
                join_first(&dx.red_flags, 1, "clinical presentation"),
                join_first(&dx.differential_diagnoses, 1, "other possibilities"),
            ),
            1 => format!(
                "From a {} perspective, the {} will be crucial. The patient's age ({}) and clinical presentation suggest we need to be thorough but also consider the most likely diagnosis.",
                self.specialty.to_lowercase(),
                join_first(&dx.recommended_tests, 2, "diagnostic workup"),
                self.field_or(CaseField::Age, "unknown"),
            ),
            _ => format!(
                "The key differentiating factors I'm considering are: 1) The temporal pattern of symptoms, 2) The patient's risk factors including {}, and 3) The physical examination findings. This supports my confidence level of {}%.",
                self.field_or(CaseField::PastMedicalHistory, "medical history"),
                dx.confidence,
            ),
        }
    }

    fn senior_guidance(&self, index: usize) -> String {
        match index {
            0 => format!(
                "Excellent discussion, colleagues. This case illustrates the importance of collaborative decision-making. {}'s concern about differential diagnosis is well-founded - we must always consider 'cannot miss' diagnoses. {}'s expertise in {} is valuable. I recommend we proceed with {} while monitoring for {}.",
                self.primary_profile.name,
                self.specialist_profile.name,
                self.specialist.condition,
                join_first(&self.specialist.recommended_tests, 1, "the proposed workup"),
                join_first(&self.primary.red_flags, 1, "red flags"),
            ),
            1 => format!(
                "This case demonstrates good clinical reasoning from both perspectives. The patient's presentation of {} requires us to balance common diagnoses with serious conditions. Given the {} nature and {}, I support the {} assessment while keeping primary care concerns in mind.",
                self.field_or(CaseField::ChiefComplaint, "symptoms"),
                self.field_or(CaseField::Severity, "clinical"),
                self.field_or(CaseField::Duration, "timeline"),
                self.specialty.to_lowercase(),
            ),
            _ => format!(
                "From a patient safety standpoint, both assessments show appropriate clinical vigilance. The convergence on {} with high confidence is reassuring. Key teaching points: 1) Always consider the clinical context, 2) Use evidence-based guidelines, 3) Maintain appropriate index of suspicion for serious conditions. The multidisciplinary approach here exemplifies best practice.",
                self.specialist.condition,
            ),
        }
    }

    fn follow_up_question(&self) -> String {
        format!(
            "Thank you for that insight. Should we consider any additional risk stratification given the patient's {} and {}?",
            self.field_or(CaseField::FamilyHistory, "family history"),
            self.field_or(CaseField::SocialHistory, "social factors"),
        )
    }

    fn risk_response(&self) -> String {
        format!(
            "Absolutely. The family history and social factors are important. In this case, the {} increases the likelihood of {}. We should also consider patient education about {} and ensure appropriate follow-up.",
            self.field_or(CaseField::PastMedicalHistory, "medical background"),
            self.specialist.condition,
            join_first(&self.specialist.red_flags, 1, "warning signs"),
        )
    }
}
