//! Reasoning service configuration from TOML (`[provider]` section)

use council_domain::Model;
use serde::{Deserialize, Serialize};

/// Known provider kinds.
pub const PROVIDER_KINDS: [&str; 2] = ["openai", "demo"];

/// Raw provider configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Adapter to use: "openai" or "demo".
    pub kind: String,
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Direct API key (prefer `api_key_env`).
    pub api_key: Option<String>,
    /// Model identifier sent to the service.
    pub model: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: "openai".to_string(),
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: Model::default().to_string(),
        }
    }
}

impl FileProviderConfig {
    pub fn is_demo(&self) -> bool {
        self.kind.trim().eq_ignore_ascii_case("demo")
    }

    pub fn is_known_kind(&self) -> bool {
        let kind = self.kind.trim().to_lowercase();
        PROVIDER_KINDS.contains(&kind.as_str())
    }

    /// The model to request; the demo provider always answers as [`Model::Demo`].
    pub fn model(&self) -> Model {
        if self.is_demo() {
            return Model::Demo;
        }
        let Ok(model) = self.model.parse();
        model
    }

    /// API key from the config file, falling back to `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_openai() {
        let config = FileProviderConfig::default();
        assert!(config.is_known_kind());
        assert!(!config.is_demo());
        assert_eq!(config.model(), Model::Gpt4);
    }

    #[test]
    fn test_demo_kind_forces_demo_model() {
        let config = FileProviderConfig {
            kind: "Demo".to_string(),
            ..Default::default()
        };
        assert!(config.is_demo());
        assert_eq!(config.model(), Model::Demo);
    }

    #[test]
    fn test_inline_api_key_wins() {
        let config = FileProviderConfig {
            api_key: Some("sk-inline".to_string()),
            api_key_env: "COUNCIL_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-inline"));
    }

    #[test]
    fn test_missing_api_key() {
        let config = FileProviderConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "COUNCIL_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }
}
