// Tool definitions in OpenAI-compatible function calling format
//
// The research agent exposes two tools to the model:
// - get_search: the web search capability, called once per sub-query
// - final_result: carries the structured answer; calling it ends the run
//
// Reference: https://platform.openai.com/docs/guides/function-calling

use serde::{Deserialize, Serialize};

/// Name of the web search tool
pub const SEARCH_TOOL_NAME: &str = "get_search";

/// Name of the tool the model calls to deliver the structured result
pub const FINAL_RESULT_TOOL_NAME: &str = "final_result";

/// Tool definition in OpenAI function calling format
///
/// # Example
/// ```json
/// {
///   "type": "function",
///   "function": {
///     "name": "get_search",
///     "description": "Perform a search using the web search client.",
///     "parameters": {
///       "type": "object",
///       "properties": {
///         "query": { "type": "string" },
///         "query_number": { "type": "integer" }
///       },
///       "required": ["query", "query_number"]
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Always "function" for function calling
    #[serde(rename = "type")]
    pub tool_type: String,

    /// The function definition
    pub function: FunctionDefinition,
}

/// Function definition within a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,

    /// Clear description of what this function does and when to use it
    pub description: String,

    /// JSON schema for the function parameters
    pub parameters: FunctionParameters,
}

/// Parameters schema for a function (JSON Schema format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameters {
    /// Always "object" for parameter schemas
    #[serde(rename = "type")]
    pub param_type: String,

    /// Properties of the object (parameter definitions)
    pub properties: serde_json::Value,

    /// List of required parameter names
    pub required: Vec<String>,
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, properties: serde_json::Value, required: &[&str]) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.to_string(),
                description: description.to_string(),
                parameters: FunctionParameters {
                    param_type: "object".to_string(),
                    properties,
                    required: required.iter().map(|s| s.to_string()).collect(),
                },
            },
        }
    }

    /// The web search tool: `(query: string, query_number: integer)`
    pub fn search_tool() -> Self {
        Self::new(
            SEARCH_TOOL_NAME,
            "Perform a search using the web search client.",
            serde_json::json!({
                "query": {
                    "type": "string",
                    "description": "Keywords to search the web for"
                },
                "query_number": {
                    "type": "integer",
                    "description": "Ordinal of this search within the current research task"
                }
            }),
            &["query", "query_number"],
        )
    }

    /// The structured result tool
    ///
    /// Field descriptions steer the model toward the three-part article shape.
    pub fn final_result_tool() -> Self {
        Self::new(
            FINAL_RESULT_TOOL_NAME,
            "The final response which ends this conversation",
            serde_json::json!({
                "research_title": {
                    "type": "string",
                    "description": "Markdown heading describing the article topic, prefixed with #"
                },
                "research_main": {
                    "type": "string",
                    "description": "A main section that provides a detailed news article"
                },
                "research_bullets": {
                    "type": "string",
                    "description": "A set of bullet points summarizing key points"
                }
            }),
            &["research_title", "research_main", "research_bullets"],
        )
    }
}

/// The full tool set offered to the research agent
pub fn research_tools() -> Vec<ToolDefinition> {
    vec![ToolDefinition::search_tool(), ToolDefinition::final_result_tool()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_tool_definition() {
        let tool = ToolDefinition::search_tool();

        assert_eq!(tool.tool_type, "function");
        assert_eq!(tool.function.name, "get_search");
        assert_eq!(tool.function.parameters.param_type, "object");
        assert_eq!(tool.function.parameters.required, vec!["query", "query_number"]);

        let params = &tool.function.parameters.properties;
        assert_eq!(params["query"]["type"], "string");
        assert_eq!(params["query_number"]["type"], "integer");
    }

    #[test]
    fn test_final_result_tool_definition() {
        let tool = ToolDefinition::final_result_tool();

        assert_eq!(tool.function.name, "final_result");
        assert_eq!(tool.function.parameters.required.len(), 3);
        assert!(tool.function.parameters.properties["research_title"]["description"]
            .as_str()
            .unwrap()
            .contains("prefixed with #"));
    }

    #[test]
    fn test_tool_serializes_in_openai_format() {
        let json = serde_json::to_value(ToolDefinition::search_tool()).unwrap();

        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "get_search");
        assert_eq!(json["function"]["parameters"]["type"], "object");
    }

    #[test]
    fn test_research_tools_contains_both() {
        let names: Vec<String> = research_tools().iter().map(|t| t.function.name.clone()).collect();
        assert_eq!(names, vec!["get_search", "final_result"]);
    }
}
