//! Reasoning service adapters
//!
//! - `openai` — OpenAI-compatible Chat Completions over HTTP
//! - `demo` — offline canned responder

pub mod demo;
pub mod openai;

pub use demo::DemoGateway;
pub use openai::OpenAiGateway;

use crate::config::FileProviderConfig;
use council_application::ports::llm_gateway::{GatewayError, LlmGateway};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Demo,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Demo => "demo",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "demo" => Ok(ProviderKind::Demo),
            other => Err(GatewayError::Other(format!("Unknown provider: {}", other))),
        }
    }
}

/// Build the gateway selected by `[provider]`.
///
/// `force_demo` overrides the configured kind (the `--demo` flag).
pub fn gateway_for(
    config: &FileProviderConfig,
    force_demo: bool,
) -> Result<Arc<dyn LlmGateway>, GatewayError> {
    let kind = if force_demo {
        ProviderKind::Demo
    } else {
        config.kind.parse()?
    };
    info!(provider = kind.as_str(), "Selected reasoning service");

    match kind {
        ProviderKind::Demo => Ok(Arc::new(DemoGateway::new())),
        ProviderKind::OpenAi => {
            let api_key = config.resolve_api_key().ok_or_else(|| {
                GatewayError::ConnectionError(format!(
                    "No API key found; set {} or provider.api_key, or use --demo",
                    config.api_key_env
                ))
            })?;
            Ok(Arc::new(OpenAiGateway::new(&config.base_url, api_key)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyless() -> FileProviderConfig {
        FileProviderConfig {
            api_key: None,
            api_key_env: "COUNCIL_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(" demo".parse::<ProviderKind>().unwrap(), ProviderKind::Demo);
        assert!("bedrock".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_openai_without_key_is_an_error() {
        assert!(matches!(
            gateway_for(&keyless(), false),
            Err(GatewayError::ConnectionError(_))
        ));
    }

    #[test]
    fn test_demo_flag_needs_no_key() {
        assert!(gateway_for(&keyless(), true).is_ok());
    }

    #[test]
    fn test_inline_key_builds_openai() {
        let config = FileProviderConfig {
            api_key: Some("sk-test".to_string()),
            ..keyless()
        };
        assert!(gateway_for(&config, false).is_ok());
    }
}
