//! Mock implementations for testing.
//!
//! Mock LLM clients and factories shared by the integration tests, so no test
//! needs a live provider.

use async_trait::async_trait;
use edflex::llm::client::{LLMClientFactoryTrait, Provider};
use edflex::llm::coordinator::ConversationMessage;
use edflex::llm::{LLMClient, LLMResponse, TokenUsage};
use edflex::types::{AppError, Result, ToolCall, ToolDefinition};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock LLM client with configurable responses.
///
/// Clones share their script and request log, so a factory can hand out
/// copies and the test still sees every request.
///
/// # Examples
///
/// ```ignore
/// // Always answers with the same text
/// let client = MockLLMClient::new("Hello!");
///
/// // Requests one round of tool calls, then answers
/// let client = MockLLMClient::with_tool_calls("Done", vec![vec![tool_call("1", "calculator", args)]]);
///
/// // Always fails
/// let client = MockLLMClient::failing();
/// ```
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    rounds: Arc<Mutex<VecDeque<Vec<ToolCall>>>>,
    requests: Arc<Mutex<Vec<Vec<ConversationMessage>>>>,
    should_fail: bool,
}

impl MockLLMClient {
    /// A client that answers every request with `response`.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            rounds: Arc::default(),
            requests: Arc::default(),
            should_fail: false,
        }
    }

    /// A client that requests each round of tool calls in turn, then answers
    /// with `response`.
    pub fn with_tool_calls(response: &str, rounds: Vec<Vec<ToolCall>>) -> Self {
        Self {
            rounds: Arc::new(Mutex::new(rounds.into())),
            ..Self::new(response)
        }
    }

    /// A client that always returns an error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// Message lists received by `generate_with_tools_and_history`, in order.
    pub fn requests(&self) -> Vec<Vec<ConversationMessage>> {
        self.requests.lock().clone()
    }

    fn check(&self) -> Result<()> {
        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(())
    }
}

/// A tool call as the model would request it.
pub fn tool_call(id: &str, name: &str, arguments: Value) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.check()?;
        Ok(self.response.clone())
    }

    async fn generate_with_system(&self, _system: &str, _prompt: &str) -> Result<String> {
        self.check()?;
        Ok(self.response.clone())
    }

    async fn generate_with_history(&self, _messages: &[(String, String)]) -> Result<String> {
        self.check()?;
        Ok(self.response.clone())
    }

    async fn generate_with_tools_and_history(
        &self,
        messages: &[ConversationMessage],
        _tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        self.requests.lock().push(messages.to_vec());
        self.check()?;

        let tool_calls = self.rounds.lock().pop_front().unwrap_or_default();
        let (content, finish_reason) = if tool_calls.is_empty() {
            (self.response.clone(), "stop")
        } else {
            (String::new(), "tool_calls")
        };

        Ok(LLMResponse {
            content,
            tool_calls,
            finish_reason: finish_reason.to_string(),
            usage: Some(TokenUsage::new(10, 5)),
        })
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Mock LLM factory that always hands out clones of one `MockLLMClient`.
pub struct MockLLMFactory {
    client: MockLLMClient,
    models: Mutex<Vec<String>>,
}

impl MockLLMFactory {
    pub fn new(client: MockLLMClient) -> Self {
        Self {
            client,
            models: Mutex::new(Vec::new()),
        }
    }

    /// Model names clients were requested for.
    pub fn requested_models(&self) -> Vec<String> {
        self.models.lock().clone()
    }
}

#[async_trait]
impl LLMClientFactoryTrait for MockLLMFactory {
    fn default_provider(&self) -> Result<Provider> {
        Ok(Provider::Ollama {
            base_url: "http://localhost:11434".to_string(),
            model: "mock".to_string(),
            temperature: None,
            max_tokens: None,
        })
    }

    async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        Ok(Box::new(self.client.clone()))
    }

    async fn create_for_model(&self, model_name: &str) -> Result<Box<dyn LLMClient>> {
        self.models.lock().push(model_name.to_string());
        Ok(Box::new(self.client.clone()))
    }
}
