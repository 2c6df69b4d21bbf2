// Tool execution abstraction for the agent run loop
// The agent decides which tools to call; executors decide how they run.

use crate::agent::tools::SEARCH_TOOL_NAME;
use crate::error::{ResearchError, Result};
use crate::research::RunContext;
use crate::search::SearchProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Trait for executing tool calls requested by the model
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool call and return the result as a string
    ///
    /// # Arguments
    /// * `tool_name` - Name of the tool to call (e.g., "get_search")
    /// * `arguments` - JSON arguments for the tool call
    ///
    /// # Errors
    /// - `ToolArguments` / `UnknownTool`: the model can be asked to correct the call
    /// - Anything else aborts the run
    async fn execute_tool(&self, tool_name: &str, arguments: &serde_json::Value) -> Result<String>;
}

/// Arguments the model passes to the search tool
#[derive(Debug, Clone, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default)]
    pub query_number: Option<i64>,
}

impl SearchArgs {
    /// Decode search arguments, accepting both JSON objects and JSON-encoded strings
    pub fn parse(arguments: &serde_json::Value) -> Result<Self> {
        let decoded = match arguments {
            serde_json::Value::String(raw) => serde_json::from_str(raw),
            other => serde_json::from_value(other.clone()),
        };

        decoded.map_err(|e| ResearchError::ToolArguments {
            tool: SEARCH_TOOL_NAME.to_string(),
            message: e.to_string(),
        })
    }
}

/// Executes the web search tool with the run's result limit bound in
///
/// Every search call made during one run requests exactly `max_results`
/// results: the value from the run context, never a model-chosen one.
pub struct SearchToolExecutor {
    search: Arc<dyn SearchProvider>,
    max_results: u32,
    calls: AtomicUsize,
}

impl SearchToolExecutor {
    pub fn new(search: Arc<dyn SearchProvider>, context: &RunContext) -> Self {
        Self {
            search,
            max_results: context.max_results,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of searches issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ToolExecutor for SearchToolExecutor {
    async fn execute_tool(&self, tool_name: &str, arguments: &serde_json::Value) -> Result<String> {
        if tool_name != SEARCH_TOOL_NAME {
            return Err(ResearchError::UnknownTool(tool_name.to_string()));
        }

        let args = SearchArgs::parse(arguments)?;
        let call_number = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            "Search #{} (query_number {:?}): '{}' (max {} results)",
            call_number,
            args.query_number,
            args.query,
            self.max_results
        );

        self.search.search_context(&args.query, self.max_results).await
    }
}
