mod openai;
mod types;

pub use openai::OpenAiAdapter;
pub use types::*;

use crate::error::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Unified LLM interface that all adapters must implement
///
/// The research agent only needs complete (non-streaming) responses: every
/// turn either carries tool calls or the final structured answer.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LlmAdapter: Send + Sync {
    /// Get a complete chat response, including any requested tool calls
    async fn complete_chat(&self, request: LlmRequest) -> Result<LlmResponse>;
}

/// Factory function to create the appropriate LLM adapter
pub fn create_adapter(
    adapter_type: AdapterType,
    api_key: String,
    api_base: String,
) -> Box<dyn LlmAdapter> {
    match adapter_type {
        AdapterType::OpenAI => Box::new(OpenAiAdapter::with_base_url(api_key, api_base)),
    }
}
