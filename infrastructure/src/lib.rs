//! Infrastructure layer for the clinical council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDiagnosisConfig, FileDiscussionConfig, FileLoggingConfig,
    FileOutputConfig, FileProviderConfig,
};
pub use logging::JsonlAuditLogger;
pub use providers::{DemoGateway, OpenAiGateway, ProviderKind, gateway_for};
