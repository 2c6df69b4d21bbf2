use super::{build_context, SearchProvider, SearchSource};
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Token budget for a single search context
const CONTEXT_MAX_TOKENS: usize = 4000;

/// Client for the Tavily search API
pub struct TavilyClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl TavilyClient {
    pub fn with_base_url(api_key: String, api_base: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.api_base)
    }

    /// Run a basic search and return the ranked results
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<TavilyResult>> {
        let request = SearchRequestBody::basic(query, max_results);

        let response = self
            .client
            .post(self.search_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ResearchError::SearchError(format!("Failed to send request to Tavily: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &error_text));
        }

        let body: SearchResponseBody = response.json().await?;
        Ok(body.into_results(max_results))
    }
}

fn status_error(status: StatusCode, body: &str) -> ResearchError {
    ResearchError::SearchError(format!("Tavily API error {}: {}", status, body))
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search_context(&self, query: &str, max_results: u32) -> Result<String> {
        let results = self.search(query, max_results).await?;
        tracing::info!("Tavily returned {} results for '{}'", results.len(), query);

        let sources: Vec<SearchSource> = results.into_iter().map(SearchSource::from).collect();
        build_context(&sources, CONTEXT_MAX_TOKENS)
    }
}

#[derive(Debug, Serialize)]
struct SearchRequestBody<'a> {
    query: &'a str,
    search_depth: &'static str,
    topic: &'static str,
    max_results: u32,
    include_answer: bool,
    include_raw_content: bool,
    include_images: bool,
}

impl<'a> SearchRequestBody<'a> {
    fn basic(query: &'a str, max_results: u32) -> Self {
        Self {
            query,
            search_depth: "basic",
            topic: "general",
            max_results,
            include_answer: false,
            include_raw_content: false,
            include_images: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

impl SearchResponseBody {
    /// Ranked results, never more than requested
    fn into_results(self, max_results: u32) -> Vec<TavilyResult> {
        let mut results = self.results;
        results.truncate(max_results as usize);
        results
    }
}

/// A single ranked result from Tavily
#[derive(Debug, Clone, Deserialize)]
pub struct TavilyResult {
    pub url: String,
    #[serde(default)]
    pub content: String,
}

impl From<TavilyResult> for SearchSource {
    fn from(result: TavilyResult) -> Self {
        Self {
            url: result.url,
            content: result.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_url() {
        let client = TavilyClient::with_base_url("tvly".to_string(), "http://localhost:9000/".to_string());
        assert_eq!(client.search_url(), "http://localhost:9000/search");
    }

    #[test]
    fn test_request_body_carries_max_results() {
        let body = serde_json::to_value(SearchRequestBody::basic("ai security", 7)).unwrap();

        assert_eq!(body["query"], "ai security");
        assert_eq!(body["max_results"], 7);
        assert_eq!(body["search_depth"], "basic");
        assert_eq!(body["include_raw_content"], false);
        assert!(body.get("api_key").is_none());
    }

    #[test]
    fn test_parse_response_body() {
        let raw = json!({
            "query": "ai security",
            "response_time": 1.2,
            "results": [
                {"title": "A", "url": "https://a.example", "content": "alpha", "score": 0.9},
                {"url": "https://b.example"}
            ]
        });

        let body: SearchResponseBody = serde_json::from_value(raw).unwrap();
        assert_eq!(body.results.len(), 2);
        assert_eq!(body.results[0].url, "https://a.example");
        assert_eq!(body.results[1].content, "");

        let source = SearchSource::from(body.results[0].clone());
        assert_eq!(source.url, "https://a.example");
        assert_eq!(source.content, "alpha");
    }

    #[test]
    fn test_missing_results_defaults_to_empty() {
        let body: SearchResponseBody = serde_json::from_value(json!({"query": "x"})).unwrap();
        assert!(body.results.is_empty());
    }

    #[test]
    fn test_results_capped_at_max_results() {
        let results: Vec<_> = (0..8)
            .map(|i| json!({"url": format!("https://{}.example", i), "content": "c"}))
            .collect();
        let body: SearchResponseBody = serde_json::from_value(json!({"results": results})).unwrap();

        let capped = body.into_results(3);
        assert_eq!(capped.len(), 3);
        assert_eq!(capped[2].url, "https://2.example");
    }

    #[test]
    fn test_short_result_list_kept_whole() {
        let body: SearchResponseBody =
            serde_json::from_value(json!({"results": [{"url": "https://a.example"}]})).unwrap();
        assert_eq!(body.into_results(10).len(), 1);
    }

    #[test]
    fn test_status_error_is_search_error() {
        let err = status_error(StatusCode::UNAUTHORIZED, "invalid api key");
        assert!(matches!(err, ResearchError::SearchError(ref msg)
            if msg.contains("401") && msg.contains("invalid api key")));
    }
}
