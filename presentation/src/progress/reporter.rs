//! Progress reporting for diagnostic sessions

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use council_domain::{AgentProfile, DiagnosisOutcome, DiagnosticSession, SessionStatus, Stage};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Reports progress with a single bar spanning the three stages
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn stage_display_name(stage: Stage) -> &'static str {
        match stage {
            Stage::Primary => "Stage 1: Primary Assessment",
            Stage::Specialist => "Stage 2: Specialist Consultation",
            Stage::Consensus => "Stage 3: Senior Consensus",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage, agent: &AgentProfile) {
        let mut guard = self.bar();
        let bar = guard.get_or_insert_with(|| {
            let bar = ProgressBar::new(Stage::ALL.len() as u64);
            bar.set_style(Self::stage_style());
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        });
        bar.set_prefix(Self::stage_display_name(stage));
        bar.set_message(format!("{} reviewing...", agent.name));
    }

    fn on_stage_complete(&self, _stage: Stage, outcome: &DiagnosisOutcome) {
        if let Some(bar) = self.bar().as_ref() {
            let mark = if outcome.is_degraded() {
                "!".yellow()
            } else {
                "v".green()
            };
            bar.set_message(format!(
                "{} {} ({:.0}%)",
                mark, outcome.condition, outcome.confidence
            ));
            bar.inc(1);
        }
    }

    fn on_session_complete(&self, session: &DiagnosticSession) {
        if let Some(bar) = self.bar().take() {
            match session.status() {
                SessionStatus::Completed => {
                    bar.finish_with_message(format!("{}", "Consultation complete!".green()))
                }
                status => bar.abandon_with_message(format!(
                    "{} ({})",
                    "Consultation stopped".red(),
                    status
                )),
            }
        }
    }
}

/// Line-per-event progress on stderr, for when stderr is not a terminal
pub struct SimpleProgress;

impl SimpleProgress {
    fn start_line(stage: Stage, agent: &AgentProfile) -> String {
        format!(
            "{} {} ({})",
            "->".cyan(),
            ProgressReporter::stage_display_name(stage).bold(),
            agent.name
        )
    }

    fn complete_line(outcome: &DiagnosisOutcome) -> String {
        if outcome.is_degraded() {
            format!("  {} {} (manual review)", "!".yellow(), outcome.condition)
        } else {
            format!(
                "  {} {} ({:.0}%)",
                "v".green(),
                outcome.condition,
                outcome.confidence
            )
        }
    }
}

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage, agent: &AgentProfile) {
        eprintln!("{}", Self::start_line(stage, agent));
    }

    fn on_stage_complete(&self, _stage: Stage, outcome: &DiagnosisOutcome) {
        eprintln!("{}", Self::complete_line(outcome));
    }

    fn on_session_complete(&self, session: &DiagnosticSession) {
        eprintln!("{} {}", "Session".dimmed(), session.status());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{PatientCase, SessionId};

    #[test]
    fn test_bar_lifecycle() {
        let reporter = ProgressReporter::new();
        let profile = AgentProfile::new("Dr. Primary", "Primary Care Physician", None);
        let outcome = DiagnosisOutcome::new("Migraine", 70.0, "Classic aura");

        reporter.on_stage_start(Stage::Primary, &profile);
        reporter.on_stage_complete(Stage::Primary, &outcome);
        assert_eq!(reporter.bar().as_ref().map(|b| b.position()), Some(1));

        let session = DiagnosticSession::new(SessionId::new(), PatientCase::new(), "Neurology");
        reporter.on_session_complete(&session);
        assert!(reporter.bar().is_none());
    }

    #[test]
    fn test_simple_progress_lines() {
        let profile = AgentProfile::new("Dr. Senior", "Senior Attending Physician", None);
        let start = SimpleProgress::start_line(Stage::Consensus, &profile);
        assert!(start.contains("Stage 3: Senior Consensus"));
        assert!(start.ends_with("(Dr. Senior)"));

        let done = SimpleProgress::complete_line(&DiagnosisOutcome::new("Migraine", 70.0, "Aura"));
        assert!(done.ends_with("Migraine (70%)"));

        let degraded = SimpleProgress::complete_line(&DiagnosisOutcome::fallback("free text"));
        assert!(degraded.ends_with("(manual review)"));
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(
            ProgressReporter::stage_display_name(Stage::Consensus),
            "Stage 3: Senior Consensus"
        );
    }
}
