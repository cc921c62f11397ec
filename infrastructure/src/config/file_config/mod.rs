//! Raw TOML configuration data types
//!
//! These structs mirror the config file exactly. Every section defaults, so
//! an empty file (or no file) yields a working configuration.

mod diagnosis;
mod logging;
mod output;
mod provider;

pub use diagnosis::{FileDiagnosisConfig, FileDiscussionConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use provider::{FileProviderConfig, PROVIDER_KINDS};

use council_application::DiagnosisParams;
use council_domain::{ConfigIssue, ConfigIssueCode, MAX_DISCUSSION_ROUNDS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning service settings
    pub provider: FileProviderConfig,
    /// Agent and pipeline settings
    pub diagnosis: FileDiagnosisConfig,
    /// Discussion simulation settings
    pub discussion: FileDiscussionConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Audit trail and log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let diagnosis = &self.diagnosis;

        if !(0.0..=2.0).contains(&diagnosis.temperature) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::TemperatureOutOfRange,
                format!(
                    "diagnosis.temperature must be between 0.0 and 2.0 (got {})",
                    diagnosis.temperature
                ),
            ));
        }
        if diagnosis.max_tokens == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroMaxTokens,
                "diagnosis.max_tokens must be greater than 0",
            ));
        }
        if diagnosis.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "diagnosis.timeout_secs must be greater than 0",
            ));
        }
        if diagnosis.default_specialty.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptySpecialty,
                format!(
                    "diagnosis.default_specialty is empty, falling back to '{}'",
                    FileDiagnosisConfig::default().default_specialty
                ),
            ));
        }
        if self.discussion.rounds == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroDiscussionRounds,
                "discussion.rounds is 0, falling back to 1",
            ));
        }
        if self.discussion.rounds > MAX_DISCUSSION_ROUNDS {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TooManyDiscussionRounds,
                format!(
                    "discussion.rounds is {}, capped at {}",
                    self.discussion.rounds, MAX_DISCUSSION_ROUNDS
                ),
            ));
        }
        if !self.provider.is_known_kind() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnknownProvider,
                format!(
                    "provider.kind: unknown value '{}' (expected one of: {})",
                    self.provider.kind,
                    PROVIDER_KINDS.join(", ")
                ),
            ));
        }

        issues
    }

    /// Pipeline parameters, with warning-level values replaced by fallbacks.
    pub fn diagnosis_params(&self) -> DiagnosisParams {
        let diagnosis = &self.diagnosis;
        let mut params = DiagnosisParams::default()
            .with_model(self.provider.model())
            .with_temperature(diagnosis.temperature)
            .with_max_tokens(diagnosis.max_tokens)
            .with_timeout(Some(Duration::from_secs(diagnosis.timeout_secs)))
            .with_discussion_rounds(self.discussion.rounds.clamp(1, MAX_DISCUSSION_ROUNDS));

        let specialty = diagnosis.default_specialty.trim();
        if !specialty.is_empty() {
            params = params.with_default_specialty(specialty);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{Model, OutputFormat, Severity};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
kind = "openai"
base_url = "https://llm.hospital.internal"
model = "gpt-4o"

[diagnosis]
temperature = 0.2
max_tokens = 2000
timeout_secs = 30
default_specialty = "Cardiology"

[discussion]
rounds = 3

[output]
format = "json"
color = false

[logging]
audit_log = "/var/log/council/audit.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.base_url, "https://llm.hospital.internal");
        assert_eq!(config.provider.model(), Model::Gpt4o);
        assert_eq!(config.diagnosis.max_tokens, 2000);
        assert_eq!(config.discussion.rounds, 3);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.logging.audit_log.is_some());
        assert!(config.validate().is_empty());

        let params = config.diagnosis_params();
        assert_eq!(params.model, Model::Gpt4o);
        assert_eq!(params.temperature, 0.2);
        assert_eq!(params.timeout, Some(Duration::from_secs(30)));
        assert_eq!(params.default_specialty, "Cardiology");
        assert_eq!(params.discussion_rounds, 3);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[provider]
kind = "demo"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.provider.is_demo());
        assert_eq!(config.diagnosis, FileDiagnosisConfig::default());
        assert!(config.output.color);
        assert_eq!(config.diagnosis_params().model, Model::Demo);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let config = FileConfig {
            provider: FileProviderConfig {
                kind: "bedrock".to_string(),
                ..Default::default()
            },
            diagnosis: FileDiagnosisConfig {
                temperature: 3.5,
                max_tokens: 0,
                timeout_secs: 0,
                default_specialty: " ".to_string(),
            },
            discussion: FileDiscussionConfig { rounds: 0 },
            ..Default::default()
        };

        let issues = config.validate();
        let codes: Vec<_> = issues.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![
                ConfigIssueCode::TemperatureOutOfRange,
                ConfigIssueCode::ZeroMaxTokens,
                ConfigIssueCode::ZeroTimeout,
                ConfigIssueCode::EmptySpecialty,
                ConfigIssueCode::ZeroDiscussionRounds,
                ConfigIssueCode::UnknownProvider,
            ]
        );
        assert_eq!(
            issues.iter().filter(|i| i.severity == Severity::Warning).count(),
            2
        );
    }

    #[test]
    fn test_params_fall_back_on_warnings() {
        let config = FileConfig {
            diagnosis: FileDiagnosisConfig {
                default_specialty: String::new(),
                ..Default::default()
            },
            discussion: FileDiscussionConfig { rounds: 0 },
            ..Default::default()
        };

        let params = config.diagnosis_params();
        assert_eq!(params.default_specialty, "Internal Medicine");
        assert_eq!(params.discussion_rounds, 1);
    }

    #[test]
    fn test_discussion_rounds_are_capped() {
        let config = FileConfig {
            discussion: FileDiscussionConfig { rounds: 500 },
            ..Default::default()
        };

        let codes: Vec<_> = config.validate().iter().map(|i| i.code).collect();
        assert_eq!(codes, vec![ConfigIssueCode::TooManyDiscussionRounds]);
        assert_eq!(config.diagnosis_params().discussion_rounds, MAX_DISCUSSION_ROUNDS);
    }
}
