//! Application layer for clinical-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_SPECIALTY, DiagnosisParams};
pub use ports::{
    audit_logger::{AuditEvent, AuditLogger, NoAuditLogger},
    llm_gateway::{GatewayError, GenerationParams, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::clinical_agent::{AgentError, ClinicalAgent};
pub use use_cases::orchestrator::{DiagnosticOrchestrator, OrchestratorError};
pub use use_cases::session_registry::{RegistryError, SessionLease, SessionRegistry};
