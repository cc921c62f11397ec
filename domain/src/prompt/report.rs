//! Transcript texts written around each pipeline stage

use crate::diagnosis::DiagnosisOutcome;
use crate::session::entities::Stage;

pub const SESSION_STARTED: &str = "🏥 Starting diagnostic consultation...";
pub const SESSION_COMPLETED: &str = "✅ Diagnostic consultation completed successfully!";

/// Texts for the "starting" and "complete" entries of each stage
pub struct StageReportTemplate;

impl StageReportTemplate {
    pub fn session_failed(error: impl std::fmt::Display) -> String {
        format!("❌ Error in diagnostic process: {}", error)
    }

    /// Entry appended before the agent is invoked.
    pub fn announcement(stage: Stage, specialty: &str) -> String {
        match stage {
            Stage::Primary => "🔍 Analyzing patient presentation and symptoms...".to_string(),
            Stage::Specialist => format!("🔬 Providing {} specialist opinion...", specialty),
            Stage::Consensus => "👨‍⚕️ Reviewing assessments and synthesizing consensus...".to_string(),
        }
    }

    /// Detailed entry appended once the outcome is back.
    pub fn report(stage: Stage, outcome: &DiagnosisOutcome) -> String {
        let [title, diagnosis, confidence, reasoning, differentials, tests, flags] = match stage {
            Stage::Primary => [
                "Primary Assessment Complete",
                "Suspected Diagnosis",
                "Confidence Level",
                "Clinical Reasoning",
                "Differential Diagnoses",
                "Recommended Tests",
                "Red Flags Identified",
            ],
            Stage::Specialist => [
                "Specialist Consultation Complete",
                "Specialist Diagnosis",
                "Confidence Level",
                "Specialist Reasoning",
                "Additional Differential Diagnoses",
                "Specialized Testing Recommendations",
                "Clinical Concerns",
            ],
            Stage::Consensus => [
                "Senior Review and Final Consensus",
                "Final Diagnosis",
                "Overall Confidence",
                "Synthesis and Clinical Decision",
                "Comprehensive Differential Diagnosis",
                "Final Testing Recommendations",
                "Critical Safety Considerations",
            ],
        };

        let mut report = format!(
            "**{title}**\n\n\
             **{diagnosis}:** {}\n\
             **{confidence}:** {}%\n\n\
             **{reasoning}:**\n{}\n\n\
             **{differentials}:**\n{}\n\n\
             **{tests}:**\n{}\n\n\
             **{flags}:**\n{}",
            outcome.condition,
            outcome.confidence,
            outcome.reasoning,
            list_or(&outcome.differential_diagnoses, "None specified"),
            list_or(&outcome.recommended_tests, "None specified"),
            list_or(&outcome.red_flags, "None identified"),
        );
        if stage == Stage::Consensus {
            report.push_str(&format!(
                "\n\n**ICD-10 Code:** {}",
                outcome.icd10_code.as_deref().unwrap_or("Not specified")
            ));
        }
        report
    }
}

fn list_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_report() {
        let outcome = DiagnosisOutcome::new("ACS", 75.0, "Typical chest pain")
            .with_recommended_tests(vec!["ECG".into(), "Troponin".into()]);
        let report = StageReportTemplate::report(Stage::Primary, &outcome);
        assert!(report.starts_with("**Primary Assessment Complete**"));
        assert!(report.contains("**Suspected Diagnosis:** ACS"));
        assert!(report.contains("**Confidence Level:** 75%"));
        assert!(report.contains("**Recommended Tests:**\nECG, Troponin"));
        assert!(report.contains("**Red Flags Identified:**\nNone identified"));
        assert!(!report.contains("ICD-10"));
    }

    #[test]
    fn test_consensus_report_includes_icd10() {
        let outcome = DiagnosisOutcome::new("ACS", 90.0, "r");
        let report = StageReportTemplate::report(Stage::Consensus, &outcome);
        assert!(report.contains("**Overall Confidence:** 90%"));
        assert!(report.ends_with("**ICD-10 Code:** Not specified"));
    }

    #[test]
    fn test_specialist_announcement_names_specialty() {
        assert_eq!(
            StageReportTemplate::announcement(Stage::Specialist, "Cardiology"),
            "🔬 Providing Cardiology specialist opinion..."
        );
    }
}
