// Research Agent Configuration
// This agent turns a query into a short news article using several web searches

use crate::agent::{AgentConfig, DATE_PLACEHOLDER};

/// Create the research assistant agent
///
/// The agent is told to pick strong keywords for 3-5 searches, number each
/// search, and combine the results into one article. The second system
/// message carries the run date so the model can reason about recency.
///
/// # Arguments
/// * `model` - Model identifier for the chat-completion provider
pub fn create_research_agent(model: &str) -> AgentConfig {
    let mut config = AgentConfig::new(
        "researcher".to_string(),
        "Research Assistant".to_string(),
        model.to_string(),
    );

    config.instructions = "You are a helpful research assistant, you are an expert in research. \
When given a query, you will identify strong keywords to do 3-5 searches using the provided search tool. \
Then combine results into a detailed response."
        .to_string();

    config.context_instructions = Some(format!(
        "You're a helpful research assistant and an expert in research. \
When given a question, write strong keywords to do 3-5 searches in total \
(each with a query_number) and then combine the results. \
If you need today's date it is {}. \
Focus on providing accurate and current information.",
        DATE_PLACEHOLDER
    ));

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::RunContext;

    #[test]
    fn test_research_agent_creation() {
        let agent = create_research_agent("gpt-4o-mini");

        assert_eq!(agent.id, "researcher");
        assert_eq!(agent.model, "gpt-4o-mini");
        assert!(agent.instructions.contains("3-5 searches"));
        assert_eq!(agent.max_retries, 1);
    }

    #[test]
    fn test_research_agent_dates_its_prompt() {
        let agent = create_research_agent("gpt-4o-mini");
        let context = RunContext::new("2024-11-05".to_string(), 5);

        let dated = agent.render_context_instructions(&context).unwrap();
        assert!(dated.contains("If you need today's date it is 2024-11-05."));
        assert!(!dated.contains(DATE_PLACEHOLDER));
    }
}
