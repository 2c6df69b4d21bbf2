// Research orchestration: one request in, one structured article out
//
// A Researcher owns the configured agent and the shared search client. Each
// call builds a fresh RunContext, binds the result limit into a search tool
// executor, and awaits a single agent run. No retries or partial results at
// this layer: the run either yields a complete ResearchResult or an error.

mod types;

pub use types::*;

use crate::agent::ResearchAgent;
use crate::error::Result;
use crate::search::SearchProvider;
use crate::tool_executor::SearchToolExecutor;
use std::sync::Arc;
use std::time::Instant;

pub struct Researcher {
    agent: ResearchAgent,
    search: Arc<dyn SearchProvider>,
}

impl Researcher {
    pub fn new(agent: ResearchAgent, search: Arc<dyn SearchProvider>) -> Self {
        Self { agent, search }
    }

    pub fn agent(&self) -> &ResearchAgent {
        &self.agent
    }

    /// Research a query dated today
    pub async fn research(&self, request: &SearchRequest) -> Result<ResearchResult> {
        let context = RunContext::for_today(request.result_limit);
        self.research_with_context(&request.query, &context).await
    }

    /// Research a query with an explicit run context
    pub async fn research_with_context(
        &self,
        query: &str,
        context: &RunContext,
    ) -> Result<ResearchResult> {
        tracing::info!(
            "Researching '{}' (max {} results per search, date {})",
            query,
            context.max_results,
            context.todays_date
        );

        let started = Instant::now();
        let executor = SearchToolExecutor::new(Arc::clone(&self.search), context);
        let result = self.agent.run(query, context, &executor).await;

        match &result {
            Ok(_) => tracing::info!(
                "Research complete: {} searches in {:.1}s",
                executor.calls(),
                started.elapsed().as_secs_f32()
            ),
            Err(e) => tracing::error!("Research failed after {} searches: {}", executor.calls(), e),
        }

        result
    }
}
