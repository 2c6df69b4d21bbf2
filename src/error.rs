// Centralized error handling using thiserror for type-safe error management
//
// One enum covers every failure a research request can hit. Variants map to the
// place the failure happened (configuration, model endpoint, search endpoint,
// agent run) so the UI and tests can match on them.
//
// ToolArguments, UnknownTool and InvalidResult are recoverable inside an agent run:
// they are reported back to the model as corrective messages. Everything else aborts
// the request.

use thiserror::Error;

/// Main error type for Researchbot
///
/// Error Handling Strategy:
/// - IO errors: Automatically converted via #[from] IoError variant
/// - Serde errors: Automatically converted via #[from] SerdeError variant
/// - HTTP errors: Automatically converted via #[from] ReqwestError variant
/// - Application errors: Use specific variants (EnvError, LlmError, etc.)
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Required environment variable not found or blank
    ///
    /// Raised while loading configuration at startup (API keys).
    #[error("Environment error: {0}")]
    EnvError(String),

    /// Configuration or dependency wiring error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// LLM adapter or communication error
    ///
    /// Connection failures, non-success status codes, and responses
    /// without a usable choice.
    #[error("LLM error: {0}")]
    LlmError(String),

    /// Web search provider error
    #[error("Search error: {0}")]
    SearchError(String),

    /// The model called a tool with arguments that do not match its schema
    #[error("Invalid arguments for tool '{tool}': {message}")]
    ToolArguments { tool: String, message: String },

    /// The model called a tool that is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The model's final output could not be decoded into a ResearchResult
    #[error("Invalid research result: {0}")]
    InvalidResult(String),

    /// The agent ran out of model requests or corrective retries
    #[error("Agent budget exceeded: {0}")]
    AgentBudgetExceeded(String),

    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// HTTP request failed
    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

impl ResearchError {
    /// Whether the agent loop may report this error to the model and continue
    pub fn is_correctable(&self) -> bool {
        matches!(
            self,
            ResearchError::ToolArguments { .. }
                | ResearchError::UnknownTool(_)
                | ResearchError::InvalidResult(_)
        )
    }
}

/// Type alias for Result with ResearchError
pub type Result<T> = std::result::Result<T, ResearchError>;

// Bridge for anyhow-based call sites (the binary entry point)
impl From<anyhow::Error> for ResearchError {
    fn from(err: anyhow::Error) -> Self {
        ResearchError::ConfigError(err.to_string())
    }
}
