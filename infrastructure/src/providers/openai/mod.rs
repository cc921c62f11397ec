//! OpenAI-compatible reasoning service adapter
//!
//! Talks to `{base_url}/v1/chat/completions`, so any service exposing the
//! same API (Azure OpenAI, local inference servers) works by changing
//! `provider.base_url`.

mod session;
mod types;

pub use session::OpenAiSession;

use async_trait::async_trait;
use council_application::ports::llm_gateway::{
    GatewayError, GenerationParams, LlmGateway, LlmSession,
};
use council_domain::Model;
use reqwest::Client;
use tracing::info;

/// LLM Gateway implementation for OpenAI-compatible Chat Completions APIs
pub struct OpenAiGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiGateway {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(base_url = %base_url, "OpenAiGateway initialized");
        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
        params: GenerationParams,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::ConnectionError(
                "No API key configured for the reasoning service".to_string(),
            ));
        }

        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            self.endpoint(),
            self.api_key.clone(),
            model.clone(),
            system_prompt.to_string(),
            params,
        )))
    }
}
