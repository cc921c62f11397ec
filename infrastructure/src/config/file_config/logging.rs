//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL audit trail of every agent interaction and transcript entry
    pub audit_log: Option<PathBuf>,
    /// Diagnostic log file (tracing output), in addition to stderr
    pub log_file: Option<PathBuf>,
}
