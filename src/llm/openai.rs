use super::types::*;
use super::LlmAdapter;
use crate::agent::ToolDefinition;
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Adapter for OpenAI-compatible chat completion endpoints
pub struct OpenAiAdapter {
    client: Client,
    api_key: String,
    api_base: String,
}

impl OpenAiAdapter {
    pub fn with_base_url(api_key: String, api_base: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    async fn send_request(&self, request: &ApiRequest) -> Result<reqwest::Response> {
        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ResearchError::LlmError(format!("Failed to send request to OpenAI: {}", e)))
    }
}

#[async_trait]
impl LlmAdapter for OpenAiAdapter {
    async fn complete_chat(&self, request: LlmRequest) -> Result<LlmResponse> {
        let api_request = ApiRequest {
            model: request.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            messages: request.messages.into_iter().map(ApiMessage::from).collect(),
            stream: false,
            temperature: request.temperature,
            tools: request.tools,
            tool_choice: request.tool_choice,
        };

        let response = self.send_request(&api_request).await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &error_text));
        }

        let completion: CompletionResponse = response.json().await?;
        if let Some(usage) = &completion.usage {
            tracing::debug!(
                "Completion usage: {} prompt + {} completion tokens",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        completion.into_response()
    }
}

fn status_error(status: StatusCode, body: &str) -> ResearchError {
    ResearchError::LlmError(format!("OpenAI API error {}: {}", status, body))
}

// Internal API types
#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Custom tool definitions (OpenAI function calling format)
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolDefinition>>,

    /// Tool choice parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl From<Message> for ApiMessage {
    fn from(message: Message) -> Self {
        let tool_calls = message
            .tool_calls
            .map(|calls| calls.into_iter().map(ApiToolCall::from).collect::<Vec<_>>());

        // Assistant turns that only carry tool calls are sent with null content
        let content = if message.content.is_empty() && tool_calls.is_some() {
            None
        } else {
            Some(message.content)
        };

        Self {
            role: message.role,
            content,
            tool_calls,
            tool_call_id: message.tool_call_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    call_type: String,
    function: ApiFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiFunctionCall {
    name: String,
    /// JSON-encoded arguments, as a string on the wire
    arguments: String,
}

impl From<ToolCall> for ApiToolCall {
    fn from(call: ToolCall) -> Self {
        let arguments = match call.arguments {
            serde_json::Value::String(raw) => raw,
            other => other.to_string(),
        };

        Self {
            id: call.id,
            call_type: function_type(),
            function: ApiFunctionCall {
                name: call.name,
                arguments,
            },
        }
    }
}

impl From<ApiToolCall> for ToolCall {
    fn from(call: ApiToolCall) -> Self {
        // Keep unparseable argument strings verbatim so the agent can report them
        let arguments = serde_json::from_str(&call.function.arguments)
            .unwrap_or(serde_json::Value::String(call.function.arguments));

        Self {
            id: call.id,
            name: call.function.name,
            arguments,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

impl CompletionResponse {
    fn into_response(self) -> Result<LlmResponse> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ResearchError::LlmError("No choices in response".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .map(|calls| calls.into_iter().map(ToolCall::from).collect::<Vec<_>>())
            .filter(|calls| !calls.is_empty());

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            finish_reason: choice.finish_reason,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ApiMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_completions_url() {
        let adapter = OpenAiAdapter::with_base_url("key".to_string(), "http://localhost:1234/v1/".to_string());
        assert_eq!(adapter.completions_url(), "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn test_parse_tool_call_response() {
        let raw = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "get_search",
                            "arguments": "{\"query\":\"ai security\",\"query_number\":1}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 120, "completion_tokens": 20}
        });

        let completion: CompletionResponse = serde_json::from_value(raw).unwrap();
        let response = completion.into_response().unwrap();

        assert_eq!(response.content, "");
        assert_eq!(response.finish_reason.as_deref(), Some("tool_calls"));
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_abc");
        assert_eq!(calls[0].name, "get_search");
        assert_eq!(calls[0].arguments["query"], "ai security");
        assert_eq!(calls[0].arguments["query_number"], 1);
    }

    #[test]
    fn test_unparseable_arguments_kept_as_string() {
        let call = ApiToolCall {
            id: "call_1".to_string(),
            call_type: function_type(),
            function: ApiFunctionCall {
                name: "get_search".to_string(),
                arguments: "{not json".to_string(),
            },
        };

        let call = ToolCall::from(call);
        assert_eq!(call.arguments, serde_json::Value::String("{not json".to_string()));
    }

    #[test]
    fn test_empty_choices_is_error() {
        let completion: CompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(completion.into_response(), Err(ResearchError::LlmError(_))));
    }

    #[test]
    fn test_assistant_tool_call_message_serialization() {
        let message = Message::assistant(
            "",
            vec![ToolCall {
                id: "call_1".to_string(),
                name: "get_search".to_string(),
                arguments: json!({"query": "x", "query_number": 1}),
            }],
        );

        let wire = serde_json::to_value(ApiMessage::from(message)).unwrap();
        assert_eq!(wire["role"], "assistant");
        assert!(wire["content"].is_null());
        assert_eq!(wire["tool_calls"][0]["type"], "function");
        assert_eq!(wire["tool_calls"][0]["function"]["name"], "get_search");

        let args: serde_json::Value =
            serde_json::from_str(wire["tool_calls"][0]["function"]["arguments"].as_str().unwrap())
                .unwrap();
        assert_eq!(args["query"], "x");
    }

    #[test]
    fn test_tool_message_serialization() {
        let wire = serde_json::to_value(ApiMessage::from(Message::tool("call_1", "[]"))).unwrap();
        assert_eq!(wire, json!({"role": "tool", "content": "[]", "tool_call_id": "call_1"}));
    }

    #[test]
    fn test_status_error_is_llm_error() {
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, "{\"error\":\"rate limited\"}");
        assert!(matches!(err, ResearchError::LlmError(ref msg)
            if msg.contains("429") && msg.contains("rate limited")));
    }
}
