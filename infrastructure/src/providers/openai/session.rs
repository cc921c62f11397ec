//! One agent's conversation with an OpenAI-compatible service
//!
//! Chat Completions is stateless; each `send` carries the preamble and the
//! single prompt, which is all a pipeline stage ever needs.

use super::types::{self, ChatRequest, ChatResponse};
use async_trait::async_trait;
use council_application::ports::llm_gateway::{GatewayError, GenerationParams, LlmSession};
use council_domain::Model;
use reqwest::Client;
use tracing::debug;

pub struct OpenAiSession {
    client: Client,
    endpoint: String,
    api_key: String,
    model: Model,
    system_prompt: String,
    params: GenerationParams,
}

impl OpenAiSession {
    pub fn new(
        client: Client,
        endpoint: String,
        api_key: String,
        model: Model,
        system_prompt: String,
        params: GenerationParams,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
            system_prompt,
            params,
        }
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let request = ChatRequest::new(
            self.model.as_str(),
            &self.system_prompt,
            content,
            self.params.temperature,
            self.params.max_tokens,
        );

        debug!(
            model = %self.model,
            prompt_bytes = content.len(),
            "Calling chat completions"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| types::convert_request_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("Malformed response: {}", e)))?;
        completion.into_text()
    }
}
