//! Transcript domain
//!
//! The transcript is the append-only record of every agent and system
//! utterance in a session. Entries are created here and appended through
//! [`DiagnosticSession::record`](crate::session::DiagnosticSession::record).

use crate::agent::profile::AgentProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    System,
    Analysis,
    Question,
    Response,
    Consensus,
    Discussion,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::System => "system",
            MessageKind::Analysis => "analysis",
            MessageKind::Question => "question",
            MessageKind::Response => "response",
            MessageKind::Consensus => "consensus",
            MessageKind::Discussion => "discussion",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single transcript entry (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub agent_name: String,
    pub agent_role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ConversationEntry {
    pub fn new(
        agent_name: impl Into<String>,
        agent_role: impl Into<String>,
        kind: MessageKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            agent_role: agent_role.into(),
            content: content.into(),
            timestamp: Utc::now(),
            kind,
            confidence: None,
        }
    }

    /// Entry spoken by an agent, named and labelled from its profile.
    pub fn from_profile(profile: &AgentProfile, kind: MessageKind, content: impl Into<String>) -> Self {
        Self::new(profile.name.clone(), profile.role.clone(), kind, content)
    }

    /// Entry spoken by the system itself.
    pub fn system(content: impl Into<String>) -> Self {
        Self::from_profile(&AgentProfile::system(), MessageKind::System, content)
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}
