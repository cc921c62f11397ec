//! Prompt domain
//!
//! Templates for the reasoning prompts and for the transcript entries
//! written around each pipeline stage.

mod report;
mod template;

pub use report::{SESSION_COMPLETED, SESSION_STARTED, StageReportTemplate};
pub use template::ClinicalPromptTemplate;
