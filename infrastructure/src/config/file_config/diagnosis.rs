//! Pipeline configuration from TOML (`[diagnosis]` and `[discussion]` sections)

use council_application::DEFAULT_SPECIALTY;
use serde::{Deserialize, Serialize};

/// Raw diagnosis configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiagnosisConfig {
    /// Sampling temperature (0.0–2.0)
    pub temperature: f64,
    /// Upper bound on generated tokens per call
    pub max_tokens: u32,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Specialty consulted when the case does not name one
    pub default_specialty: String,
}

impl Default for FileDiagnosisConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 1500,
            timeout_secs: 60,
            default_specialty: DEFAULT_SPECIALTY.to_string(),
        }
    }
}

/// Raw discussion configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    /// Rounds appended by `--discuss` when no count is given
    pub rounds: u32,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        Self { rounds: 2 }
    }
}
