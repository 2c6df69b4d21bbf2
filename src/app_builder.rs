// AppBuilder pattern for dependency construction and injection
//
// The long-lived pieces of the app (tokio runtime, LLM adapter, search
// client, configured agent) are built once at startup and handed to the UI
// as an AppDependencies container. Tests swap in their own adapter and search
// provider through the same builder.
//
// Usage Example:
//     // Production
//     let deps = AppBuilder::new()
//         .with_config(AppConfig::load()?)
//         .with_production_deps()?
//         .build()?;
//
//     // Testing
//     let deps = AppBuilder::new()
//         .with_llm_adapter(fake_llm)
//         .with_search_provider(fake_search)
//         .build()?;

use crate::agent::{AgentConfig, ResearchAgent};
use crate::agents::create_research_agent;
use crate::config::{AppConfig, DEFAULT_MODEL};
use crate::error::{Result, ResearchError};
use crate::llm::{create_adapter, AdapterType, LlmAdapter};
use crate::research::Researcher;
use crate::search::{SearchProvider, TavilyClient};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Container for the wired application dependencies
pub struct AppDependencies {
    /// Runtime that executes research requests off the UI thread
    pub runtime: Arc<Runtime>,

    /// Orchestrator shared by every request
    pub researcher: Arc<Researcher>,
}

/// Builder for constructing the app with dependency injection
pub struct AppBuilder {
    config: Option<AppConfig>,
    agent_config: Option<AgentConfig>,
    llm_adapter: Option<Arc<dyn LlmAdapter>>,
    search: Option<Arc<dyn SearchProvider>>,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            agent_config: None,
            llm_adapter: None,
            search: None,
        }
    }

    /// Set the loaded application configuration (required for production)
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the agent configuration
    pub fn with_agent_config(mut self, agent_config: AgentConfig) -> Self {
        self.agent_config = Some(agent_config);
        self
    }

    /// Override the LLM adapter
    pub fn with_llm_adapter(mut self, adapter: Arc<dyn LlmAdapter>) -> Self {
        self.llm_adapter = Some(adapter);
        self
    }

    /// Override the web search provider
    pub fn with_search_provider(mut self, search: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(search);
        self
    }

    /// Create the real OpenAI adapter and Tavily client from the configuration
    ///
    /// Dependencies already set explicitly are kept.
    ///
    /// # Errors
    /// - No configuration provided
    pub fn with_production_deps(mut self) -> Result<Self> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| ResearchError::ConfigError("Configuration required".to_string()))?;

        if self.llm_adapter.is_none() {
            self.llm_adapter = Some(Arc::from(create_adapter(
                AdapterType::OpenAI,
                config.openai_api_key.clone(),
                config.openai_api_base.clone(),
            )));
        }

        if self.search.is_none() {
            self.search = Some(Arc::new(TavilyClient::with_base_url(
                config.tavily_api_key.clone(),
                config.tavily_api_base.clone(),
            )));
        }

        if self.agent_config.is_none() {
            self.agent_config = Some(create_research_agent(&config.model));
        }

        Ok(self)
    }

    /// Finalize and validate all dependencies
    ///
    /// # Errors
    /// - LLM adapter or search provider missing
    /// - Runtime creation fails
    pub fn build(self) -> Result<AppDependencies> {
        let llm_adapter = self
            .llm_adapter
            .ok_or_else(|| ResearchError::ConfigError("LLM adapter required".to_string()))?;
        let search = self
            .search
            .ok_or_else(|| ResearchError::ConfigError("Search provider required".to_string()))?;

        let agent_config = match (self.agent_config, &self.config) {
            (Some(agent_config), _) => agent_config,
            (None, Some(config)) => create_research_agent(&config.model),
            (None, None) => create_research_agent(DEFAULT_MODEL),
        };

        let runtime = Arc::new(Runtime::new().map_err(|e| {
            ResearchError::ConfigError(format!("Failed to create runtime: {}", e))
        })?);

        let agent = ResearchAgent::new(agent_config, llm_adapter);
        let researcher = Arc::new(Researcher::new(agent, search));

        Ok(AppDependencies { runtime, researcher })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmAdapter;
    use crate::search::MockSearchProvider;

    fn test_config() -> AppConfig {
        AppConfig::from_lookup(|name| match name {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "TAVILY_API_KEY" => Some("tvly-test".to_string()),
            "RESEARCH_MODEL" => Some("gpt-4o".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_production_deps_require_config() {
        let result = AppBuilder::new().with_production_deps();
        assert!(matches!(result, Err(ResearchError::ConfigError(_))));
    }

    #[test]
    fn test_production_deps_build() {
        let deps = AppBuilder::new()
            .with_config(test_config())
            .with_production_deps()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(deps.researcher.agent().config().model, "gpt-4o");
        assert_eq!(deps.researcher.agent().config().id, "researcher");
    }

    #[test]
    fn test_build_requires_llm_adapter() {
        let result = AppBuilder::new()
            .with_search_provider(Arc::new(MockSearchProvider::new()))
            .build();
        assert!(matches!(result, Err(ResearchError::ConfigError(ref msg)) if msg.contains("LLM")));
    }

    #[test]
    fn test_build_requires_search_provider() {
        let result = AppBuilder::new()
            .with_llm_adapter(Arc::new(MockLlmAdapter::new()))
            .build();
        assert!(matches!(result, Err(ResearchError::ConfigError(ref msg)) if msg.contains("Search")));
    }

    #[test]
    fn test_injected_deps_are_kept() {
        let mut agent_config = create_research_agent("custom-model");
        agent_config.max_requests = 4;

        let deps = AppBuilder::new()
            .with_config(test_config())
            .with_llm_adapter(Arc::new(MockLlmAdapter::new()))
            .with_search_provider(Arc::new(MockSearchProvider::new()))
            .with_agent_config(agent_config)
            .with_production_deps()
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(deps.researcher.agent().config().model, "custom-model");
        assert_eq!(deps.researcher.agent().config().max_requests, 4);
    }
}
