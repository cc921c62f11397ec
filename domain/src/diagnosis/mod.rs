//! Diagnosis domain
//!
//! - [`outcome::DiagnosisOutcome`] — structured result of one reasoning pass
//! - [`parsing`] — extraction of outcomes from free-text replies

pub mod outcome;
pub mod parsing;

pub use outcome::{DiagnosisOutcome, OutcomeSource};
pub use parsing::{extract_json_block, parse_diagnosis_response};
