//! Prompt templates for the diagnostic pipeline

use crate::agent::profile::AgentProfile;
use crate::case::{CaseField, PatientCase};
use crate::diagnosis::DiagnosisOutcome;

/// Templates for the instruction preamble, the clinical prompt and the
/// peer context handed from one stage to the next
pub struct ClinicalPromptTemplate;

impl ClinicalPromptTemplate {
    /// Shared preamble: identity, safety guidelines and the required output schema.
    pub fn base_preamble(profile: &AgentProfile, guidelines: &[&str]) -> String {
        let guideline_lines = guidelines
            .iter()
            .map(|g| format!("- {}", g))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are {name}, a {role} with expertise in {specialty}.

Clinical Guidelines:
{guidelines}

Your responses must:
1. Follow evidence-based medicine principles
2. Use structured clinical reasoning (SOAP format when applicable)
3. Provide confidence scores (0-100%) for diagnoses
4. Include ICD-10 codes when confident in diagnosis
5. Recommend appropriate next steps or consultations

Always format your response as valid JSON with the following structure:
{{
    "primary_diagnosis": "condition name",
    "confidence": confidence_percentage,
    "reasoning": "detailed clinical reasoning",
    "differential_diagnoses": ["alternative1", "alternative2"],
    "recommended_tests": ["test1", "test2"],
    "red_flags": ["concern1", "concern2"],
    "icd10_code": "code if confident",
    "next_steps": "recommendations"
}}"#,
            name = profile.name,
            role = profile.role,
            specialty = profile.specialty_or_general(),
            guidelines = guideline_lines,
        )
    }

    /// Structured clinical prompt built from the case and optional peer context.
    pub fn clinical_prompt(case: &PatientCase, context: Option<&str>) -> String {
        let field = |f: CaseField| case.text_or_placeholder(f);
        let context = context
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("None provided");

        format!(
            r#"Patient Case Analysis Required:

CHIEF COMPLAINT: {chief_complaint}

PRESENT ILLNESS:
- Age: {age}
- Sex: {sex}
- Symptoms: {symptoms}
- Duration: {duration}
- Severity: {severity}

PAST MEDICAL HISTORY: {pmh}
MEDICATIONS: {medications}
ALLERGIES: {allergies}
FAMILY HISTORY: {family}
SOCIAL HISTORY: {social}

VITAL SIGNS: {vitals}
PHYSICAL EXAM: {exam}

ADDITIONAL CONTEXT FROM OTHER CLINICIANS:
{context}

Please provide your clinical assessment following the JSON format specified in your instructions."#,
            chief_complaint = field(CaseField::ChiefComplaint),
            age = field(CaseField::Age),
            sex = field(CaseField::Sex),
            symptoms = field(CaseField::Symptoms),
            duration = field(CaseField::Duration),
            severity = field(CaseField::Severity),
            pmh = field(CaseField::PastMedicalHistory),
            medications = field(CaseField::Medications),
            allergies = field(CaseField::Allergies),
            family = field(CaseField::FamilyHistory),
            social = field(CaseField::SocialHistory),
            vitals = field(CaseField::VitalSigns),
            exam = field(CaseField::PhysicalExam),
            context = context,
        )
    }

    /// Peer context handed to the specialist: the primary assessment.
    pub fn primary_context(primary: &DiagnosisOutcome) -> String {
        format!(
            "The primary care physician has assessed this case and provided the following:\n\n{}\n\nPlease provide your specialist perspective on this case.",
            Self::outcome_block(primary)
        )
    }

    /// Peer context handed to the senior reviewer: both prior assessments.
    pub fn consensus_context(primary: &DiagnosisOutcome, specialist: &DiagnosisOutcome) -> String {
        format!(
            "PRIMARY CARE ASSESSMENT:\n{}\n\nSPECIALIST ASSESSMENT:\n{}\n\nPlease provide your synthesis and final diagnostic recommendation.",
            Self::outcome_block(primary),
            Self::outcome_block(specialist)
        )
    }

    fn outcome_block(outcome: &DiagnosisOutcome) -> String {
        format!(
            "Diagnosis: {} (Confidence: {}%)\nReasoning: {}\nDifferential Diagnoses: {}\nRecommended Tests: {}\nRed Flags: {}",
            outcome.condition,
            outcome.confidence,
            outcome.reasoning,
            outcome.differential_diagnoses.join(", "),
            outcome.recommended_tests.join(", "),
            outcome.red_flags.join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::guidelines::SAFETY_GUIDELINES;
    use serde_json::json;

    #[test]
    fn test_preamble_embeds_guidelines_and_schema() {
        let profile = AgentProfile::new("Dr. Primary", "Primary Care Physician", None);
        let preamble = ClinicalPromptTemplate::base_preamble(&profile, &SAFETY_GUIDELINES);
        for guideline in SAFETY_GUIDELINES {
            assert!(preamble.contains(guideline));
        }
        assert!(preamble.contains("\"primary_diagnosis\""));
        assert!(preamble.contains("expertise in general medicine"));
    }

    #[test]
    fn test_clinical_prompt_substitutes_placeholders() {
        let case = PatientCase::new()
            .with(CaseField::Age, 65)
            .with(CaseField::Symptoms, json!(["chest pain", "sweating"]));
        let prompt = ClinicalPromptTemplate::clinical_prompt(&case, None);
        assert!(prompt.contains("- Age: 65"));
        assert!(prompt.contains("- Symptoms: chest pain, sweating"));
        assert!(prompt.contains("PAST MEDICAL HISTORY: Not specified"));
        assert!(prompt.contains("CHIEF COMPLAINT: Not specified"));
        assert!(prompt.contains("ADDITIONAL CONTEXT FROM OTHER CLINICIANS:\nNone provided"));
    }

    #[test]
    fn test_clinical_prompt_includes_context() {
        let prompt =
            ClinicalPromptTemplate::clinical_prompt(&PatientCase::new(), Some("Primary thinks ACS"));
        assert!(prompt.contains("Primary thinks ACS"));
    }

    #[test]
    fn test_consensus_context_contains_both_assessments() {
        let primary = DiagnosisOutcome::new("ACS", 75.0, "chest pain")
            .with_differential_diagnoses(vec!["PE".into()]);
        let specialist = DiagnosisOutcome::new("NSTEMI", 85.0, "troponin pattern")
            .with_red_flags(vec!["Arrhythmia risk".into()]);
        let context = ClinicalPromptTemplate::consensus_context(&primary, &specialist);
        assert!(context.contains("PRIMARY CARE ASSESSMENT:\nDiagnosis: ACS (Confidence: 75%)"));
        assert!(context.contains("SPECIALIST ASSESSMENT:\nDiagnosis: NSTEMI (Confidence: 85%)"));
        assert!(context.contains("Differential Diagnoses: PE"));
        assert!(context.contains("Red Flags: Arrhythmia risk"));
    }
}
