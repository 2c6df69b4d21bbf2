use crate::error::{ResearchError, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Inclusive bound enforced by the result-count slider
pub const RESULT_LIMIT_RANGE: RangeInclusive<u32> = 3..=10;

/// Slider position on startup
pub const DEFAULT_RESULT_LIMIT: u32 = 5;

/// Query shown in the text field on startup
pub const DEFAULT_QUERY: &str = "latest AI security news";

/// One research request, as collected from the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub result_limit: u32,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, result_limit: u32) -> Self {
        Self {
            query: query.into(),
            result_limit,
        }
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY, DEFAULT_RESULT_LIMIT)
    }
}

/// Per-run dependencies handed read-only to the agent and its tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Today's date, `%Y-%m-%d`
    pub todays_date: String,

    /// Maximum results per search call
    pub max_results: u32,
}

impl RunContext {
    pub fn new(todays_date: String, max_results: u32) -> Self {
        Self {
            todays_date,
            max_results,
        }
    }

    /// Build a context dated with the local calendar day
    pub fn for_today(max_results: u32) -> Self {
        let todays_date = chrono::Local::now().format("%Y-%m-%d").to_string();
        Self::new(todays_date, max_results)
    }
}

/// The agent's structured answer
///
/// Field names on the wire match the `final_result` tool schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResult {
    /// Markdown heading describing the article topic, prefixed with #
    #[serde(rename = "research_title")]
    pub title: String,

    /// Detailed news article
    #[serde(rename = "research_main")]
    pub body: String,

    /// Markdown bullet list summarizing key points
    #[serde(rename = "research_bullets")]
    pub bullets: String,
}

impl ResearchResult {
    /// Decode tool-call arguments into a result
    ///
    /// Accepts a JSON object or a JSON-encoded string. All three fields are
    /// required; a missing or non-string field is rejected as a whole.
    pub fn from_arguments(arguments: &serde_json::Value) -> Result<Self> {
        let decoded = match arguments {
            serde_json::Value::String(raw) => serde_json::from_str(raw),
            other => serde_json::from_value(other.clone()),
        };

        decoded.map_err(|e| ResearchError::InvalidResult(e.to_string()))
    }

    /// Decode a plain-text reply that should contain a JSON object
    ///
    /// Tolerates a ```json fence, closed or not.
    pub fn from_text(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let unfenced = match trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
        {
            Some(rest) => rest.trim_end().strip_suffix("```").unwrap_or(rest),
            None => trimmed,
        }
        .trim();

        if unfenced.is_empty() {
            return Err(ResearchError::InvalidResult("empty response".to_string()));
        }

        serde_json::from_str(unfenced).map_err(|e| ResearchError::InvalidResult(e.to_string()))
    }
}
