// Web search provider abstraction
//
// The research agent's only tool is a web search that returns a compact
// "search context": a JSON string of sources with their URL and content,
// ready to be handed back to the model as a tool result.

mod tavily;

pub use tavily::TavilyClient;

use crate::error::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// A single source in a search context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSource {
    pub url: String,
    pub content: String,
}

/// Trait for web search providers
///
/// One long-lived client is created at startup and shared read-only
/// across requests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search the web and return a JSON-encoded list of sources
    ///
    /// # Arguments
    /// * `query` - The search query
    /// * `max_results` - Maximum number of results the provider may return
    ///
    /// # Errors
    /// - Transport failures and non-success status codes
    /// - Responses that cannot be decoded
    async fn search_context(&self, query: &str, max_results: u32) -> Result<String>;
}

/// Estimate token count for a piece of text (~4 characters per token)
pub fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(4)
}

/// Serialize sources into a search context that fits the token budget
///
/// Sources are kept in ranking order; once adding the next source would push
/// the encoded context over `max_tokens`, it and all later sources are dropped.
pub fn build_context(sources: &[SearchSource], max_tokens: usize) -> Result<String> {
    let mut kept: Vec<&SearchSource> = Vec::with_capacity(sources.len());

    for source in sources {
        kept.push(source);
        let encoded = serde_json::to_string(&kept)?;
        if estimate_tokens(&encoded) > max_tokens {
            kept.pop();
            break;
        }
    }

    Ok(serde_json::to_string(&kept)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(url: &str, len: usize) -> SearchSource {
        SearchSource {
            url: url.to_string(),
            content: "x".repeat(len),
        }
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn test_build_context_keeps_everything_under_budget() {
        let sources = vec![source("https://a.example", 10), source("https://b.example", 10)];

        let context = build_context(&sources, 4000).unwrap();
        let decoded: Vec<SearchSource> = serde_json::from_str(&context).unwrap();
        assert_eq!(decoded, sources);
    }

    #[test]
    fn test_build_context_drops_tail_over_budget() {
        let sources = vec![
            source("https://a.example", 100),
            source("https://b.example", 100_000),
            source("https://c.example", 10),
        ];

        let context = build_context(&sources, 4000).unwrap();
        let decoded: Vec<SearchSource> = serde_json::from_str(&context).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].url, "https://a.example");
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(build_context(&[], 4000).unwrap(), "[]");
    }
}
