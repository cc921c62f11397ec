//! Application-level configuration.
//!
//! - [`DiagnosisParams`] — model, generation settings, timeouts and pipeline defaults

pub mod diagnosis_params;

pub use diagnosis_params::{DEFAULT_SPECIALTY, DiagnosisParams};
