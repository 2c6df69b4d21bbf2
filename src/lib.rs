// Library interface for Researchbot
// This exposes the research pipeline so it can be:
// - Driven by the egui front end in main.rs
// - Called from integration tests with fake model and search backends

pub mod agent;
pub mod agents;
pub mod app_builder;
pub mod config;
pub mod error;
pub mod llm;
pub mod research;
pub mod search;
pub mod tool_executor;
pub mod ui;
pub mod version;

// Re-export commonly used types for convenience
pub use agent::{AgentConfig, ResearchAgent};
pub use app_builder::{AppBuilder, AppDependencies};
pub use config::AppConfig;
pub use error::{Result, ResearchError};
pub use llm::{LlmAdapter, LlmRequest, LlmResponse, Message as LlmMessage};
pub use research::{ResearchResult, Researcher, RunContext, SearchRequest};
pub use search::{SearchProvider, TavilyClient};
pub use tool_executor::{SearchToolExecutor, ToolExecutor};
