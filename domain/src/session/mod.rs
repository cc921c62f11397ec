//! Session domain.
//!
//! - [`entities::DiagnosticSession`] — one case tracked through the pipeline
//! - [`summary::SessionSummary`] — read-only projection for UI and reports

pub mod entities;
pub mod summary;

pub use entities::{DiagnosticSession, SessionId, SessionStatus, Stage};
pub use summary::{OutcomeSummary, SessionSummary, TimelineEntry};
