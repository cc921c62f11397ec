//! Patient case domain
//!
//! The case is supplied by an external data provider; this module only
//! interprets it for prompt construction and summaries.

pub mod patient;

pub use patient::{CaseField, NOT_SPECIFIED, PatientCase};
