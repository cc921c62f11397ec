//! Model value object representing the reasoning model behind every agent

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reasoning models known to the council (Value Object)
///
/// Every agent in a session talks to the same model; the role difference
/// lives entirely in the instruction preamble.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt4,
    Gpt4Turbo,
    Gpt4o,
    Gpt4oMini,
    Gpt41,
    Gpt41Mini,
    /// Offline canned responder used for demos and dry runs
    Demo,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4 => "gpt-4",
            Model::Gpt4Turbo => "gpt-4-turbo",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Demo => "demo",
            Model::Custom(s) => s,
        }
    }

    /// Whether calls to this model leave the process
    pub fn is_remote(&self) -> bool {
        !matches!(self, Model::Demo)
    }
}

impl Default for Model {
    /// Returns the default model (GPT-4)
    fn default() -> Self {
        Model::Gpt4
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "gpt-4" => Model::Gpt4,
            "gpt-4-turbo" => Model::Gpt4Turbo,
            "gpt-4o" => Model::Gpt4o,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4.1" => Model::Gpt41,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            "demo" => Model::Demo,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse();
        Ok(model)
    }
}
