//! LLM generation backends

pub mod anthropic;
pub mod client;
pub mod error;
pub mod types;

pub use anthropic::AnthropicClient;
pub use client::GenerationBackend;
pub use error::GenerationError;
pub use types::{GenerationRequest, GenerationResponse, TokenUsage};

use std::sync::Arc;

use crate::config::LlmConfig;

/// Create a backend from configuration
pub fn create_backend(config: &LlmConfig) -> Result<Arc<dyn GenerationBackend>, GenerationError> {
    match config.provider.as_str() {
        "anthropic" => Ok(Arc::new(AnthropicClient::from_config(config)?)),
        other => Err(GenerationError::UnsupportedProvider(other.to_string())),
    }
}
