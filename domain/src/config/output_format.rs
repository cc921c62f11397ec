//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished session is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full transcript followed by all three outcomes (default)
    #[default]
    Full,
    /// Only the consensus outcome
    Consensus,
    /// Session summary as JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "consensus" => Ok(Self::Consensus),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown output format '{}' (expected full, consensus or json)",
                other
            )),
        }
    }
}
