use crate::llm::client::{LLMClient, LLMResponse, TokenUsage};
use crate::llm::coordinator::{ConversationMessage, MessageRole};
use crate::types::{AppError, Result, ToolCall, ToolDefinition};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for any `/chat/completions` endpoint (xAI, OpenAI, Ollama `/v1`).
pub struct OpenAICompatibleClient {
    http: reqwest::Client,
    provider: &'static str,
    api_base: String,
    api_key: Option<String>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAICompatibleClient {
    pub fn new(
        provider: &'static str,
        api_base: String,
        api_key: Option<String>,
        model: String,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            provider,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            model,
            temperature: None,
            max_tokens: None,
        })
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    fn request_body(&self, messages: Vec<Value>, tools: &[ToolDefinition]) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if !tools.is_empty() {
            body["tools"] = Value::Array(tools.iter().map(tool_to_json).collect());
            body["tool_choice"] = json!("auto");
        }

        body
    }

    async fn chat(&self, messages: Vec<Value>, tools: &[ToolDefinition]) -> Result<LLMResponse> {
        let body = self.request_body(messages, tools);

        let mut request = self
            .http
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(
            provider = self.provider,
            model = %self.model,
            tools = tools.len(),
            "Sending chat completion request"
        );

        let response = request.send().await.map_err(|e| {
            AppError::LLM(format!("{} request failed: {}", self.provider, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::LLM(format!(
                "{} API error ({}): {}",
                self.provider, status, error_text
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            AppError::LLM(format!("Failed to parse {} response: {}", self.provider, e))
        })?;

        parse_completion(self.provider, &response_json)
    }
}

fn tool_to_json(tool: &ToolDefinition) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
        }
    })
}

fn role_str(role: &MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
        MessageRole::Tool => "tool",
    }
}

/// Wire form of one conversation message.
pub(crate) fn message_to_json(message: &ConversationMessage) -> Value {
    let mut value = json!({
        "role": role_str(&message.role),
        "content": message.content,
    });

    if message.role == MessageRole::Assistant && !message.tool_calls.is_empty() {
        let calls: Vec<Value> = message
            .tool_calls
            .iter()
            .map(|call| {
                json!({
                    "id": call.id,
                    "type": "function",
                    "function": {
                        "name": call.name,
                        "arguments": call.arguments.to_string(),
                    }
                })
            })
            .collect();
        value["tool_calls"] = Value::Array(calls);
    }

    if let Some(id) = &message.tool_call_id {
        value["tool_call_id"] = json!(id);
    }

    value
}

/// Extract content, tool calls, finish reason and usage from a completion.
pub(crate) fn parse_completion(provider: &str, response: &Value) -> Result<LLMResponse> {
    let choice = response["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .ok_or_else(|| AppError::LLM(format!("No response from {}", provider)))?;

    let message = &choice["message"];
    let content = message["content"].as_str().unwrap_or_default().to_string();

    let tool_calls = message["tool_calls"]
        .as_array()
        .map(|calls| calls.iter().map(parse_tool_call).collect())
        .unwrap_or_default();

    let finish_reason = choice["finish_reason"]
        .as_str()
        .unwrap_or("unknown")
        .to_string();

    let usage = response["usage"].as_object().map(|usage| {
        let count = |key: &str| usage.get(key).and_then(|t| t.as_u64()).unwrap_or(0) as u32;
        TokenUsage::new(count("prompt_tokens"), count("completion_tokens"))
    });

    Ok(LLMResponse {
        content,
        tool_calls,
        finish_reason,
        usage,
    })
}

fn parse_tool_call(call: &Value) -> ToolCall {
    let name = call["function"]["name"].as_str().unwrap_or_default().to_string();
    let raw_arguments = &call["function"]["arguments"];

    let arguments = match raw_arguments {
        Value::String(text) if text.trim().is_empty() => json!({}),
        Value::String(text) => serde_json::from_str(text).unwrap_or_else(|e| {
            warn!(tool = %name, error = %e, "Tool call arguments are not valid JSON");
            json!({})
        }),
        Value::Object(_) => raw_arguments.clone(),
        _ => json!({}),
    };

    ToolCall {
        id: call["id"].as_str().unwrap_or_default().to_string(),
        name,
        arguments,
    }
}

#[async_trait]
impl LLMClient for OpenAICompatibleClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let messages = vec![json!({"role": "user", "content": prompt})];
        Ok(self.chat(messages, &[]).await?.content)
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        let messages = vec![
            json!({"role": "system", "content": system}),
            json!({"role": "user", "content": prompt}),
        ];
        Ok(self.chat(messages, &[]).await?.content)
    }

    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        let messages = messages
            .iter()
            .map(|(role, content)| {
                let role = match role.as_str() {
                    "system" | "assistant" => role.as_str(),
                    _ => "user",
                };
                json!({"role": role, "content": content})
            })
            .collect();
        Ok(self.chat(messages, &[]).await?.content)
    }

    async fn generate_with_tools_and_history(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        let messages = messages.iter().map(message_to_json).collect();
        self.chat(messages, tools).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
