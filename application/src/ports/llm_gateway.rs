//! LLM Gateway port
//!
//! Defines the interface for communicating with the reasoning service.

use async_trait::async_trait;
use council_domain::Model;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Cancelled")]
    Cancelled,

    #[error("Other error: {0}")]
    Other(String),
}

/// Generation settings sent with every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 1500,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with the
/// reasoning service. Implementations (adapters) live in the infrastructure
/// layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session with an instruction preamble
    async fn create_session(
        &self,
        model: &Model,
        system_prompt: &str,
        params: GenerationParams,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active LLM session
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and get the raw response text
    async fn send(&self, content: &str) -> Result<String, GatewayError>;
}
