//! Offline demo gateway
//!
//! Answers every stage with a well-formed structured assessment picked from
//! the case text, so the whole pipeline can be exercised without network
//! access or an API key. Confidence rises with seniority: primary 75,
//! specialist 85, senior 90.

use async_trait::async_trait;
use council_application::ports::llm_gateway::{
    GatewayError, GenerationParams, LlmGateway, LlmSession,
};
use council_domain::{AgentRole, Model, RoleKind};
use serde_json::json;
use tracing::debug;

/// Which seat the preamble belongs to; read back from the role label on its
/// first line ("You are <name>, a <role> with expertise in <specialty>.").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    Primary,
    Specialist,
    Senior,
}

impl Seat {
    fn from_preamble(preamble: &str) -> Self {
        let first_line = preamble.lines().next().unwrap_or_default();
        let head = first_line
            .split_once(" with expertise in ")
            .map_or(first_line, |(head, _)| head);

        [RoleKind::Senior, RoleKind::Specialist, RoleKind::Primary]
            .into_iter()
            .find(|kind| {
                let role = kind.build("").profile().role.clone();
                head.ends_with(&format!(", a {}", role))
            })
            .map_or(Seat::Primary, Seat::from)
    }

    fn confidence(&self) -> f64 {
        match self {
            Seat::Primary => 75.0,
            Seat::Specialist => 85.0,
            Seat::Senior => 90.0,
        }
    }
}

impl From<RoleKind> for Seat {
    fn from(kind: RoleKind) -> Self {
        match kind {
            RoleKind::Primary => Seat::Primary,
            RoleKind::Specialist => Seat::Specialist,
            RoleKind::Senior => Seat::Senior,
        }
    }
}

/// Canned presentation matched against the case text
struct Presentation {
    condition: &'static str,
    icd10_code: Option<&'static str>,
    reasoning: &'static str,
    tests: &'static [&'static str],
    differentials: &'static [&'static str],
    red_flags: &'static [&'static str],
}

const CARDIAC: Presentation = Presentation {
    condition: "Acute Coronary Syndrome",
    icd10_code: Some("I24.9"),
    reasoning: "Chest pain with associated symptoms and the patient's risk profile fit a typical acute cardiac event pattern.",
    tests: &["12-lead ECG", "Troponin levels", "Complete metabolic panel", "Chest X-ray"],
    differentials: &["Myocardial Infarction", "Unstable Angina", "Pulmonary Embolism", "Aortic Dissection"],
    red_flags: &["Time-sensitive condition", "Risk of sudden cardiac death"],
};

const ABDOMINAL: Presentation = Presentation {
    condition: "Acute Abdominal Pain - Surgical Concern",
    icd10_code: Some("R10.9"),
    reasoning: "Acute abdominal pain in this context raises concern for a surgical abdomen; location, quality and associated symptoms guide the differential.",
    tests: &["Complete blood count", "Comprehensive metabolic panel", "Lipase", "CT abdomen/pelvis", "Urinalysis"],
    differentials: &["Appendicitis", "Cholecystitis", "Pancreatitis", "Bowel obstruction"],
    red_flags: &["Peritoneal signs", "Hemodynamic instability"],
};

const GENERAL: Presentation = Presentation {
    condition: "Clinical Assessment Required",
    icd10_code: None,
    reasoning: "The symptom pattern does not point to a single diagnosis; age, sex and further workup will narrow the differential.",
    tests: &["Basic metabolic panel", "Complete blood count", "Appropriate imaging"],
    differentials: &["Multiple possibilities under consideration"],
    red_flags: &["Monitoring for clinical deterioration"],
};

impl Presentation {
    fn for_prompt(prompt: &str) -> &'static Presentation {
        let clinical = clinical_lines(prompt).to_lowercase();
        if clinical.contains("chest pain") {
            &CARDIAC
        } else if clinical.contains("abdominal pain") {
            &ABDOMINAL
        } else {
            &GENERAL
        }
    }
}

/// Chief complaint and symptom lines; peer context is ignored so a later
/// stage answers for the same case, not for the colleagues' wording.
fn clinical_lines(prompt: &str) -> String {
    prompt
        .lines()
        .filter(|line| line.starts_with("CHIEF COMPLAINT:") || line.starts_with("- Symptoms:"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Specialty named in the preamble's first line ("... with expertise in X.")
fn specialty(preamble: &str) -> &str {
    preamble
        .lines()
        .next()
        .and_then(|line| line.split_once("with expertise in "))
        .map(|(_, rest)| rest.trim_end_matches('.').trim())
        .unwrap_or("General Medicine")
}

fn respond(preamble: &str, prompt: &str) -> String {
    let seat = Seat::from_preamble(preamble);
    let presentation = Presentation::for_prompt(prompt);

    let mut tests: Vec<String> = presentation.tests.iter().map(|t| t.to_string()).collect();
    let mut red_flags: Vec<String> = presentation
        .red_flags
        .iter()
        .map(|f| f.to_string())
        .collect();

    let (reasoning, next_steps) = match seat {
        Seat::Primary => (
            presentation.reasoning.to_string(),
            "Initiate workup and obtain specialist input".to_string(),
        ),
        Seat::Specialist => {
            let specialty = specialty(preamble);
            tests.push(format!("Specialized {} workup", specialty.to_lowercase()));
            red_flags.push("Specialist monitoring required".to_string());
            (
                format!(
                    "From a {} perspective I concur with the primary assessment. {}",
                    specialty.to_lowercase(),
                    presentation.reasoning
                ),
                format!("{} follow-up after initial results", specialty),
            )
        }
        Seat::Senior => (
            format!(
                "Both assessments are consistent and complementary. {}",
                presentation.reasoning
            ),
            "Proceed with the agreed management plan".to_string(),
        ),
    };

    let mut body = json!({
        "primary_diagnosis": presentation.condition,
        "confidence": seat.confidence(),
        "reasoning": reasoning,
        "differential_diagnoses": presentation.differentials,
        "recommended_tests": tests,
        "red_flags": red_flags,
        "next_steps": next_steps,
    });
    if let Some(code) = presentation.icd10_code {
        body["icd10_code"] = json!(code);
    }

    format!("```json\n{:#}\n```", body)
}

/// Gateway that never leaves the process
#[derive(Debug, Default)]
pub struct DemoGateway;

impl DemoGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmGateway for DemoGateway {
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
        _params: GenerationParams,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(DemoSession {
            model: model.clone(),
            preamble: system_prompt.to_string(),
        }))
    }
}

pub struct DemoSession {
    model: Model,
    preamble: String,
}

#[async_trait]
impl LlmSession for DemoSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        debug!(seat = ?Seat::from_preamble(&self.preamble), "Demo response");
        Ok(respond(&self.preamble, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        ClinicalPromptTemplate, PatientCase, PrimaryDiagnostician, SeniorReviewer,
        SpecialistConsultant, parse_diagnosis_response,
    };
    use council_domain::CaseField;
    use serde_json::json;

    fn case(symptoms: serde_json::Value) -> PatientCase {
        PatientCase::new()
            .with(CaseField::Age, 58)
            .with(CaseField::Symptoms, symptoms)
    }

    async fn ask(role: &dyn AgentRole, case: &PatientCase) -> String {
        let gateway = DemoGateway::new();
        let session = gateway
            .create_session(
                &Model::Demo,
                &role.instruction_preamble(),
                GenerationParams::default(),
            )
            .await
            .unwrap();
        session
            .send(&ClinicalPromptTemplate::clinical_prompt(case, None))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_chest_pain_is_cardiac() {
        let reply = ask(&PrimaryDiagnostician::new(), &case(json!(["chest pain", "sweating"]))).await;
        let outcome = parse_diagnosis_response(&reply);

        assert_eq!(outcome.condition, "Acute Coronary Syndrome");
        assert_eq!(outcome.confidence, 75.0);
        assert_eq!(outcome.icd10_code.as_deref(), Some("I24.9"));
        assert!(!outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_abdominal_pain_for_specialist() {
        let specialist = SpecialistConsultant::new("Gastroenterology");
        let reply = ask(&specialist, &case(json!(["abdominal pain", "nausea"]))).await;
        let outcome = parse_diagnosis_response(&reply);

        assert_eq!(outcome.condition, "Acute Abdominal Pain - Surgical Concern");
        assert_eq!(outcome.confidence, 85.0);
        assert!(
            outcome
                .recommended_tests
                .contains(&"Specialized gastroenterology workup".to_string())
        );
    }

    #[tokio::test]
    async fn test_generic_case_for_senior() {
        let reply = ask(&SeniorReviewer::new(), &case(json!(["fatigue"]))).await;
        let outcome = parse_diagnosis_response(&reply);

        assert_eq!(outcome.condition, "Clinical Assessment Required");
        assert_eq!(outcome.confidence, 90.0);
        assert!(outcome.icd10_code.is_none());
    }

    #[test]
    fn test_seat_follows_role_label_not_specialty() {
        let specialist = SpecialistConsultant::new("Senior Attending Physician Liaison");
        assert_eq!(Seat::from_preamble(&specialist.instruction_preamble()), Seat::Specialist);

        let primary = PrimaryDiagnostician::new().instruction_preamble();
        assert_eq!(Seat::from_preamble(&primary), Seat::Primary);
        let senior = SeniorReviewer::new().instruction_preamble();
        assert_eq!(Seat::from_preamble(&senior), Seat::Senior);
    }

    #[test]
    fn test_peer_context_does_not_change_presentation() {
        let prompt = ClinicalPromptTemplate::clinical_prompt(
            &case(json!(["fatigue"])),
            Some("Colleague suspected chest pain of cardiac origin"),
        );
        assert_eq!(Presentation::for_prompt(&prompt).condition, GENERAL.condition);
    }
}
