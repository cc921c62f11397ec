//! Agent identity value object

use serde::{Deserialize, Serialize};

/// Display identity of a transcript speaker (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Display name, e.g. "Dr. Primary"
    pub name: String,
    /// Role label, e.g. "Primary Care Physician"
    pub role: String,
    /// Clinical specialty, if the role has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, role: impl Into<String>, specialty: Option<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            specialty,
        }
    }

    /// The pipeline itself, used for lifecycle announcements.
    pub fn system() -> Self {
        Self::new("System", "System", None)
    }

    /// Chair of the post-hoc discussion rounds.
    pub fn moderator() -> Self {
        Self::new("Moderator", "Clinical Moderator", None)
    }

    /// Specialty label, defaulting to general medicine.
    pub fn specialty_or_general(&self) -> &str {
        self.specialty.as_deref().unwrap_or("general medicine")
    }
}

impl std::fmt::Display for AgentProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}
