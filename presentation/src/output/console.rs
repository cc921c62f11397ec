//! Console output formatter for diagnostic sessions

use colored::{ColoredString, Colorize};
use council_domain::{
    CaseField, ConversationEntry, DiagnosisOutcome, DiagnosticSession, MessageKind, OutputFormat,
    SessionSummary, Stage,
};

/// Formats diagnostic sessions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a session in the requested format
    pub fn render(session: &DiagnosticSession, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(session),
            OutputFormat::Consensus => Self::format_consensus_only(session),
            OutputFormat::Json => Self::format_json(session),
        }
    }

    /// Format the complete session: patient, transcript, all three assessments
    pub fn format(session: &DiagnosticSession) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Clinical Council Consultation"));
        output.push('\n');
        output.push_str(&Self::patient_block(session));

        output.push_str(&Self::section_header("Consultation Transcript"));
        for entry in session.transcript() {
            output.push_str(&Self::entry(entry));
        }

        output.push_str(&Self::section_header("Assessments"));
        for stage in Stage::ALL {
            let title = match stage {
                Stage::Primary => "Primary Care".to_string(),
                Stage::Specialist => format!("{} Specialist", session.specialty()),
                Stage::Consensus => "Final Consensus".to_string(),
            };
            output.push_str(&format!("\n{}\n", format!("── {} ──", title).yellow().bold()));
            match session.outcome(stage) {
                Some(outcome) => output.push_str(&Self::outcome(outcome)),
                None => output.push_str(&format!("{}\n", "No assessment recorded".dimmed())),
            }
        }

        output.push_str(&Self::footer(session));
        output
    }

    /// Format the consensus only (concise output)
    pub fn format_consensus_only(session: &DiagnosticSession) -> String {
        let mut output = format!("\n{}\n\n", "=== Diagnostic Consensus ===".cyan().bold());
        output.push_str(&format!(
            "{} {}\n\n",
            "Chief complaint:".bold(),
            session.case().text_or_placeholder(CaseField::ChiefComplaint)
        ));

        match session.consensus() {
            Some(outcome) => output.push_str(&Self::outcome(outcome)),
            None => output.push_str(&format!(
                "{} (status: {})\n",
                "No consensus reached".red().bold(),
                session.status()
            )),
        }
        output
    }

    /// Format the session summary as JSON
    pub fn format_json(session: &DiagnosticSession) -> String {
        serde_json::to_string_pretty(&SessionSummary::from(session))
            .unwrap_or_else(|_| "{}".to_string())
    }

    fn patient_block(session: &DiagnosticSession) -> String {
        let case = session.case();
        format!(
            "{} {}\n{} {}, {}\n{} {}\n{} {}\n",
            "Session:".cyan().bold(),
            session.id(),
            "Patient:".cyan().bold(),
            case.text_or_placeholder(CaseField::Age),
            case.text_or_placeholder(CaseField::Sex),
            "Chief complaint:".cyan().bold(),
            case.text_or_placeholder(CaseField::ChiefComplaint),
            "Specialty:".cyan().bold(),
            session.specialty(),
        )
    }

    fn entry(entry: &ConversationEntry) -> String {
        let speaker = format!("{} ({})", entry.agent_name, entry.agent_role);
        let confidence = entry
            .confidence
            .map(|c| format!(" [{:.0}%]", c))
            .unwrap_or_default();
        format!(
            "\n{}{} {}\n{}\n",
            Self::speaker_color(entry.kind, &speaker),
            confidence.dimmed(),
            entry.timestamp.format("%H:%M:%S").to_string().dimmed(),
            entry.content
        )
    }

    fn speaker_color(kind: MessageKind, speaker: &str) -> ColoredString {
        match kind {
            MessageKind::System => speaker.dimmed(),
            MessageKind::Analysis => speaker.blue().bold(),
            MessageKind::Consensus => speaker.green().bold(),
            MessageKind::Question => speaker.magenta().bold(),
            MessageKind::Response => speaker.yellow().bold(),
            MessageKind::Discussion => speaker.cyan().bold(),
        }
    }

    fn outcome(outcome: &DiagnosisOutcome) -> String {
        let mut output = format!(
            "{} {} ({})\n",
            "Diagnosis:".bold(),
            outcome.condition,
            Self::confidence(outcome.confidence)
        );
        if let Some(code) = &outcome.icd10_code {
            output.push_str(&format!("{} {}\n", "ICD-10:".bold(), code));
        }
        output.push_str(&format!("{}\n{}\n", "Reasoning:".bold(), Self::indent(&outcome.reasoning, "  ")));

        Self::list(&mut output, "Differential diagnoses:".normal(), &outcome.differential_diagnoses);
        Self::list(&mut output, "Recommended tests:".normal(), &outcome.recommended_tests);
        Self::list(&mut output, "Red flags:".red(), &outcome.red_flags);

        if let Some(next_steps) = &outcome.next_steps {
            output.push_str(&format!("{} {}\n", "Next steps:".bold(), next_steps));
        }
        output
    }

    fn list(output: &mut String, title: ColoredString, items: &[String]) {
        if items.is_empty() {
            return;
        }
        output.push_str(&format!("{}\n", title.bold()));
        for item in items {
            output.push_str(&format!("  * {}\n", item));
        }
    }

    fn confidence(confidence: f64) -> ColoredString {
        let text = format!("{:.0}% confidence", confidence);
        if confidence >= 80.0 {
            text.green()
        } else if confidence >= 50.0 {
            text.yellow()
        } else {
            text.red()
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer(session: &DiagnosticSession) -> String {
        let duration = session
            .duration()
            .map(|d| format!(" in {:.1}s", d.num_milliseconds() as f64 / 1000.0))
            .unwrap_or_default();
        format!(
            "\n{}\n{}\n",
            format!("Status: {}{}", session.status(), duration).dimmed(),
            "=".repeat(60).cyan()
        )
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{PatientCase, SessionId};

    fn completed_session() -> DiagnosticSession {
        let case = PatientCase::new()
            .with(CaseField::Age, 65)
            .with(CaseField::Sex, "Male")
            .with(CaseField::ChiefComplaint, "chest pain");
        let mut session = DiagnosticSession::new(SessionId::new(), case, "Cardiology");
        session.begin().unwrap();
        session.record(ConversationEntry::system("Starting"));
        for stage in Stage::ALL {
            let outcome = DiagnosisOutcome::new("Acute Coronary Syndrome", 82.0, "Typical pattern")
                .with_icd10_code("I24.9")
                .with_red_flags(vec!["Ongoing pain".to_string()]);
            session.store_outcome(stage, outcome).unwrap();
        }
        session.complete().unwrap();
        session
    }

    #[test]
    fn test_full_format_contains_all_sections() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&completed_session());

        assert!(output.contains("Clinical Council Consultation"));
        assert!(output.contains("Chief complaint: chest pain"));
        assert!(output.contains("── Cardiology Specialist ──"));
        assert!(output.contains("── Final Consensus ──"));
        assert!(output.contains("Diagnosis: Acute Coronary Syndrome (82% confidence)"));
        assert!(output.contains("  * Ongoing pain"));
        assert!(output.contains("Status: completed"));
    }

    #[test]
    fn test_consensus_only() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_consensus_only(&completed_session());

        assert!(output.contains("Diagnostic Consensus"));
        assert!(output.contains("ICD-10: I24.9"));
        assert!(!output.contains("Transcript"));
    }

    #[test]
    fn test_consensus_missing() {
        colored::control::set_override(false);
        let session = DiagnosticSession::new(SessionId::new(), PatientCase::new(), "Neurology");
        let output = ConsoleFormatter::format_consensus_only(&session);

        assert!(output.contains("No consensus reached (status: initialized)"));
    }

    #[test]
    fn test_json_is_the_summary() {
        let session = completed_session();
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::render(&session, OutputFormat::Json)).unwrap();

        assert_eq!(json["status"], "completed");
        assert_eq!(json["specialty"], "Cardiology");
        assert_eq!(json["diagnoses"]["final_consensus"]["icd10_code"], "I24.9");
        assert_eq!(json["diagnostic_timeline"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
