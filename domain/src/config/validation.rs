//! Configuration issues reported by validation.
//!
//! Loaders return a list of [`ConfigIssue`]s instead of failing on the first
//! problem, so callers can print warnings and abort only on errors.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// Temperature outside 0.0–2.0.
    TemperatureOutOfRange,
    /// `max_tokens = 0` leaves no room for a reply.
    ZeroMaxTokens,
    /// `timeout_secs = 0` would expire every call immediately.
    ZeroTimeout,
    /// Discussion needs at least one round.
    ZeroDiscussionRounds,
    /// More discussion rounds than one request accepts.
    TooManyDiscussionRounds,
    /// Provider kind is not one of the known adapters.
    UnknownProvider,
    /// Default specialty is blank.
    EmptySpecialty,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}
