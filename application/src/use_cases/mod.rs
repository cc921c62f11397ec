//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod clinical_agent;
pub mod orchestrator;
pub mod session_registry;
