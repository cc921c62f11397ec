//! Progress notification port
//!
//! Defines the interface for reporting progress during the diagnostic pipeline.

use council_domain::{AgentProfile, DiagnosisOutcome, DiagnosticSession, Stage};

/// Callback for progress updates during a diagnostic session
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called before the agent of a stage is invoked
    fn on_stage_start(&self, stage: Stage, agent: &AgentProfile);

    /// Called once the stage outcome is stored
    fn on_stage_complete(&self, stage: Stage, outcome: &DiagnosisOutcome);

    /// Called when the session reaches a terminal status
    fn on_session_complete(&self, _session: &DiagnosticSession) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage, _agent: &AgentProfile) {}
    fn on_stage_complete(&self, _stage: Stage, _outcome: &DiagnosisOutcome) {}
}
