// Tool-calling agent that turns a query into a structured research result
//
// Module Organization:
// - tools.rs: OpenAI-format tool definitions (get_search, final_result)
// - AgentConfig and the ResearchAgent run loop are defined in this file
//
// A run is a bounded conversation with the model. Every turn offers the
// search tool and the final_result tool with tool_choice "required". Search
// calls are executed and their output fed back; a valid final_result call ends
// the run. Malformed calls are reported back to the model against a small
// retry budget. Remote failures end the run immediately.

pub mod tools;

use crate::error::{Result, ResearchError};
use crate::llm::{LlmAdapter, LlmRequest, Message};
use crate::research::{ResearchResult, RunContext};
use crate::tool_executor::ToolExecutor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use tools::{
    research_tools, FunctionDefinition, FunctionParameters, ToolDefinition,
    FINAL_RESULT_TOOL_NAME, SEARCH_TOOL_NAME,
};

/// Placeholder replaced with the run date in context instructions
pub const DATE_PLACEHOLDER: &str = "{todays_date}";

const PLAIN_TEXT_RETRY: &str =
    "Plain text responses are not permitted, please call one of the functions instead.";

/// Runtime configuration for an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Unique identifier for this agent
    pub id: String,

    /// Display name for the agent
    pub name: String,

    /// Static system instructions
    pub instructions: String,

    /// Second system message rendered per run; `{todays_date}` is substituted
    #[serde(default)]
    pub context_instructions: Option<String>,

    /// LLM model to use for this agent
    pub model: String,

    /// Sampling temperature, provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Maximum model requests in one run
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Corrective retries allowed in one run
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_max_requests() -> u32 {
    12
}

fn default_max_retries() -> u32 {
    1
}

impl AgentConfig {
    /// Create a new agent configuration
    pub fn new(id: String, name: String, model: String) -> Self {
        Self {
            id,
            name,
            instructions: String::new(),
            context_instructions: None,
            model,
            temperature: None,
            max_requests: default_max_requests(),
            max_retries: default_max_retries(),
        }
    }

    /// Render the per-run context instructions, if any
    pub fn render_context_instructions(&self, context: &RunContext) -> Option<String> {
        self.context_instructions
            .as_deref()
            .filter(|template| !template.is_empty())
            .map(|template| template.replace(DATE_PLACEHOLDER, &context.todays_date))
    }
}

/// An AI agent that researches a query with web search and returns a ResearchResult
pub struct ResearchAgent {
    config: AgentConfig,
    llm_adapter: Arc<dyn LlmAdapter>,
}

impl ResearchAgent {
    pub fn new(config: AgentConfig, llm_adapter: Arc<dyn LlmAdapter>) -> Self {
        Self { config, llm_adapter }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Build the opening messages for a run
    fn build_messages(&self, query: &str, context: &RunContext) -> Vec<Message> {
        let mut messages = Vec::new();

        if !self.config.instructions.is_empty() {
            messages.push(Message::system(self.config.instructions.clone()));
        }

        if let Some(dated) = self.config.render_context_instructions(context) {
            messages.push(Message::system(dated));
        }

        messages.push(Message::user(query));
        messages
    }

    fn build_request(&self, messages: &[Message]) -> LlmRequest {
        let mut request = LlmRequest::new(messages.to_vec())
            .with_model(self.config.model.clone())
            .with_tools(research_tools())
            .with_tool_choice("required".to_string());

        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }

        request
    }

    /// Count one corrective retry, failing once the budget is spent
    fn spend_retry(&self, retries: &mut u32, cause: &ResearchError) -> Result<()> {
        *retries += 1;
        if *retries > self.config.max_retries {
            return Err(ResearchError::AgentBudgetExceeded(format!(
                "exceeded maximum retries ({}): {}",
                self.config.max_retries, cause
            )));
        }

        tracing::warn!(
            "Agent '{}' retry {}/{}: {}",
            self.config.id,
            retries,
            self.config.max_retries,
            cause
        );
        Ok(())
    }

    /// Run the agent to completion
    ///
    /// # Errors
    /// - Any LLM or search failure
    /// - `AgentBudgetExceeded` when the model keeps producing unusable output
    ///   or never calls `final_result` within `max_requests`
    pub async fn run(
        &self,
        query: &str,
        context: &RunContext,
        tools: &dyn ToolExecutor,
    ) -> Result<ResearchResult> {
        let mut messages = self.build_messages(query, context);
        let mut retries = 0u32;

        for request_number in 1..=self.config.max_requests {
            tracing::debug!("Agent '{}' request {}", self.config.id, request_number);

            let response = self
                .llm_adapter
                .complete_chat(self.build_request(&messages))
                .await?;
            let calls = response.tool_calls().to_vec();

            if calls.is_empty() {
                match ResearchResult::from_text(&response.content) {
                    Ok(result) => return Ok(result),
                    Err(e) => {
                        self.spend_retry(&mut retries, &e)?;
                        messages.push(Message::assistant(response.content, vec![]));
                        messages.push(Message::user(PLAIN_TEXT_RETRY));
                        continue;
                    }
                }
            }

            messages.push(Message::assistant(response.content.clone(), calls.clone()));

            // A valid final result ends the run before any other call executes
            for call in calls.iter().filter(|c| c.name == FINAL_RESULT_TOOL_NAME) {
                match ResearchResult::from_arguments(&call.arguments) {
                    Ok(result) => return Ok(result),
                    Err(e) => {
                        self.spend_retry(&mut retries, &e)?;
                        messages.push(Message::tool(&call.id, format!("{}\n\nFix the errors and try again.", e)));
                    }
                }
            }

            for call in calls.iter().filter(|c| c.name != FINAL_RESULT_TOOL_NAME) {
                tracing::debug!("Tool call {} {}: {}", call.id, call.name, call.arguments);

                match tools.execute_tool(&call.name, &call.arguments).await {
                    Ok(output) => messages.push(Message::tool(&call.id, output)),
                    Err(e) if e.is_correctable() => {
                        self.spend_retry(&mut retries, &e)?;
                        messages.push(Message::tool(&call.id, format!("{}\n\nFix the errors and try again.", e)));
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Err(ResearchError::AgentBudgetExceeded(format!(
            "no final result after {} model requests",
            self.config.max_requests
        )))
    }
}
