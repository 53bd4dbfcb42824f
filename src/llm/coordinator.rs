//! Generic Tool Coordinator for Multi-Turn Tool Calling
//!
//! This module provides a provider-agnostic `ToolCoordinator` that works with any
//! `LLMClient` implementation. It handles the complete tool calling loop:
//!
//! 1. Send the conversation with the agent's tools to the LLM
//! 2. If the model requests tool calls, execute them
//! 3. Send tool results back to the model
//! 4. Repeat until completion or max iterations
//!
//! A coordinator is scoped to the tools one agent may use. A call to any
//! other tool is answered with an error result so the model can recover.
//!
//! # Example
//!
//! ```rust,ignore
//! use edflex::llm::coordinator::{ToolCoordinator, ToolCallingConfig};
//!
//! let coordinator = ToolCoordinator::new(client, registry, ToolCallingConfig::default())
//!     .with_allowed_tools(vec!["identify_skill_gaps".to_string()]);
//!
//! let result = coordinator
//!     .execute(Some("You are a learner profiler."), "Détecter les lacunes de compétences pour user_id: u1")
//!     .await?;
//! println!("{} ({} tool calls)", result.content, result.tool_calls.len());
//! ```

use crate::llm::client::{LLMClient, TokenUsage};
use crate::tools::registry::ToolRegistry;
use crate::types::{Result, ToolCall};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Configuration for tool calling coordination behavior.
#[derive(Debug, Clone)]
pub struct ToolCallingConfig {
    /// Maximum number of LLM iterations (not tool calls) before stopping.
    /// Each iteration is one round-trip to the LLM.
    pub max_iterations: usize,

    /// Whether to execute multiple tool calls in parallel.
    pub parallel_execution: bool,

    /// Timeout for tools without their own `timeout_secs`.
    pub tool_timeout: Duration,

    /// Abort the session on the first tool error instead of reporting it to the model.
    pub stop_on_error: bool,
}

impl Default for ToolCallingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            parallel_execution: true,
            tool_timeout: Duration::from_secs(30),
            stop_on_error: false,
        }
    }
}

/// Record of a single tool call execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Identifier assigned by the LLM.
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
    /// Result returned by the tool (or error object).
    pub result: serde_json::Value,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl ToolCallRecord {
    fn failed(call: &ToolCall, message: String, duration_ms: u64) -> Self {
        Self {
            id: call.id.clone(),
            name: call.name.clone(),
            arguments: call.arguments.clone(),
            result: serde_json::json!({ "error": message }),
            success: false,
            duration_ms,
            error: Some(message),
        }
    }
}

/// Reason why a tool coordination session ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FinishReason {
    /// Model decided to stop (no more tool calls).
    Stop,
    /// Hit the maximum iterations limit.
    MaxIterations,
    /// An unrecoverable error occurred.
    Error(String),
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinishReason::Stop => write!(f, "stop"),
            FinishReason::MaxIterations => write!(f, "max_iterations"),
            FinishReason::Error(e) => write!(f, "error: {}", e),
        }
    }
}

/// A message in a tool-calling conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
    /// Tool calls requested by the assistant (only for Assistant role).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Call being answered (only for Tool role).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// Role of a message sender in a tool-calling conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

impl ConversationMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Create an assistant message with optional tool calls.
    pub fn assistant(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
        }
    }

    /// Create a tool result message.
    pub fn tool_result(tool_call_id: impl Into<String>, result: &serde_json::Value) -> Self {
        Self {
            role: MessageRole::Tool,
            content: serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    /// Convert to the simple (role, content) format for LLMClient::generate_with_history.
    pub fn to_role_content(&self) -> (String, String) {
        let role = match self.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Tool => "tool",
        };
        (role.to_string(), self.content.clone())
    }
}

/// Result of a complete tool coordination session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorResult {
    /// Final text response from the model.
    pub content: String,

    /// All tool calls made during the session.
    pub tool_calls: Vec<ToolCallRecord>,

    /// Number of LLM round-trips performed.
    pub iterations: usize,

    pub finish_reason: FinishReason,

    /// Accumulated token usage across all iterations.
    pub total_usage: TokenUsage,

    /// Full message history, system prompt included.
    pub message_history: Vec<ConversationMessage>,
}

/// Tool coordinator that works with any LLMClient.
pub struct ToolCoordinator {
    client: Box<dyn LLMClient>,
    registry: Arc<ToolRegistry>,
    config: ToolCallingConfig,
    /// `None` offers every enabled tool in the registry.
    allowed_tools: Option<Vec<String>>,
}

impl ToolCoordinator {
    pub fn new(
        client: Box<dyn LLMClient>,
        registry: Arc<ToolRegistry>,
        config: ToolCallingConfig,
    ) -> Self {
        Self {
            client,
            registry,
            config,
            allowed_tools: None,
        }
    }

    pub fn with_defaults(client: Box<dyn LLMClient>, registry: Arc<ToolRegistry>) -> Self {
        Self::new(client, registry, ToolCallingConfig::default())
    }

    /// Restrict the session to the named tools.
    pub fn with_allowed_tools(mut self, tools: Vec<String>) -> Self {
        self.allowed_tools = Some(tools);
        self
    }

    fn is_allowed(&self, name: &str) -> bool {
        let listed = self
            .allowed_tools
            .as_ref()
            .is_none_or(|allowed| allowed.iter().any(|t| t == name));
        listed && self.registry.is_enabled(name)
    }

    /// Run a single-turn session.
    pub async fn execute(&self, system: Option<&str>, prompt: &str) -> Result<CoordinatorResult> {
        self.execute_with_history(system, &[], prompt).await
    }

    /// Run a session that continues an earlier exchange.
    ///
    /// `history` holds earlier user/assistant turns, oldest first.
    pub async fn execute_with_history(
        &self,
        system: Option<&str>,
        history: &[ConversationMessage],
        prompt: &str,
    ) -> Result<CoordinatorResult> {
        let tools = match &self.allowed_tools {
            Some(allowed) => self.registry.get_tool_definitions_for(allowed),
            None => self.registry.get_tool_definitions(),
        };

        let mut messages: Vec<ConversationMessage> = Vec::with_capacity(history.len() + 2);
        let mut all_tool_calls: Vec<ToolCallRecord> = Vec::new();
        let mut total_usage = TokenUsage::default();

        if let Some(sys) = system {
            messages.push(ConversationMessage::system(sys));
        }
        messages.extend_from_slice(history);
        messages.push(ConversationMessage::user(prompt));

        let mut last_content = String::new();

        for iteration in 0..self.config.max_iterations {
            let started = Instant::now();
            let response = self
                .client
                .generate_with_tools_and_history(&messages, &tools)
                .await?;

            debug!(
                model = self.client.model_name(),
                iteration = iteration + 1,
                tool_calls = response.tool_calls.len(),
                finish_reason = %response.finish_reason,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "LLM round-trip complete"
            );

            if let Some(usage) = &response.usage {
                total_usage = total_usage.add(usage);
            }

            messages.push(ConversationMessage::assistant(
                &response.content,
                response.tool_calls.clone(),
            ));
            last_content = response.content.clone();

            if response.tool_calls.is_empty() {
                return Ok(CoordinatorResult {
                    content: response.content,
                    tool_calls: all_tool_calls,
                    iterations: iteration + 1,
                    finish_reason: FinishReason::Stop,
                    total_usage,
                    message_history: messages,
                });
            }

            let tool_results = self.execute_tool_calls(&response.tool_calls).await?;

            for record in tool_results {
                messages.push(ConversationMessage::tool_result(&record.id, &record.result));
                all_tool_calls.push(record);
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Tool calling stopped at the iteration limit"
        );

        Ok(CoordinatorResult {
            content: last_content,
            tool_calls: all_tool_calls,
            iterations: self.config.max_iterations,
            finish_reason: FinishReason::MaxIterations,
            total_usage,
            message_history: messages,
        })
    }

    async fn execute_tool_calls(&self, calls: &[ToolCall]) -> Result<Vec<ToolCallRecord>> {
        let records = if self.config.parallel_execution {
            join_all(calls.iter().map(|call| self.execute_single_tool(call))).await
        } else {
            let mut records = Vec::with_capacity(calls.len());
            for call in calls {
                records.push(self.execute_single_tool(call).await);
            }
            records
        };

        if self.config.stop_on_error
            && let Some(failed) = records.iter().find(|r| !r.success)
        {
            return Err(crate::types::AppError::Internal(format!(
                "Tool '{}' failed: {}",
                failed.name,
                failed.error.as_deref().unwrap_or("unknown error")
            )));
        }

        Ok(records)
    }

    /// Execute a single tool call with timeout. Failures become error records.
    async fn execute_single_tool(&self, call: &ToolCall) -> ToolCallRecord {
        let start = Instant::now();

        if !self.is_allowed(&call.name) {
            warn!(tool = %call.name, "Model requested a tool outside the agent's tool set");
            return ToolCallRecord::failed(
                call,
                format!("Tool '{}' is not available to this agent", call.name),
                0,
            );
        }

        let limit = self
            .registry
            .timeout_for(&call.name)
            .unwrap_or(self.config.tool_timeout);
        let result = timeout(limit, self.registry.execute(&call.name, call.arguments.clone())).await;

        let duration_ms = start.elapsed().as_millis() as u64;

        let record = match result {
            Ok(Ok(value)) => ToolCallRecord {
                id: call.id.clone(),
                name: call.name.clone(),
                arguments: call.arguments.clone(),
                result: value,
                success: true,
                duration_ms,
                error: None,
            },
            Ok(Err(e)) => ToolCallRecord::failed(call, e.to_string(), duration_ms),
            Err(_) => ToolCallRecord::failed(call, "Tool execution timed out".to_string(), duration_ms),
        };

        info!(
            tool = %record.name,
            success = record.success,
            duration_ms = record.duration_ms,
            "Tool executed"
        );

        record
    }

    /// Get a reference to the underlying LLM client.
    pub fn client(&self) -> &dyn LLMClient {
        self.client.as_ref()
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &ToolCallingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_calling_config_default() {
        let config = ToolCallingConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert!(config.parallel_execution);
        assert_eq!(config.tool_timeout, Duration::from_secs(30));
        assert!(!config.stop_on_error);
    }

    #[test]
    fn test_conversation_message_constructors() {
        let msg = ConversationMessage::system("You are a learner profiler.");
        assert_eq!(msg.role, MessageRole::System);
        assert!(msg.tool_calls.is_empty());
        assert!(msg.tool_call_id.is_none());

        let tool_calls = vec![ToolCall {
            id: "call_1".to_string(),
            name: "calculator".to_string(),
            arguments: serde_json::json!({"operation": "add", "a": 1, "b": 2}),
        }];
        let msg = ConversationMessage::assistant("Let me calculate that.", tool_calls);
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.tool_calls[0].name, "calculator");
    }

    #[test]
    fn test_conversation_message_tool_result() {
        let result = serde_json::json!({"result": 42});
        let msg = ConversationMessage::tool_result("call_1", &result);
        assert_eq!(msg.role, MessageRole::Tool);
        assert_eq!(msg.tool_call_id, Some("call_1".to_string()));
        assert!(msg.content.contains("42"));
    }

    #[test]
    fn test_finish_reason_display() {
        assert_eq!(FinishReason::Stop.to_string(), "stop");
        assert_eq!(FinishReason::MaxIterations.to_string(), "max_iterations");
        assert_eq!(
            FinishReason::Error("boom".to_string()).to_string(),
            "error: boom"
        );
    }

    #[test]
    fn test_failed_record_carries_error_object() {
        let call = ToolCall {
            id: "c".to_string(),
            name: "explain_concept".to_string(),
            arguments: serde_json::json!({}),
        };
        let record = ToolCallRecord::failed(&call, "nope".to_string(), 3);
        assert!(!record.success);
        assert_eq!(record.result["error"], "nope");
        assert_eq!(record.error.as_deref(), Some("nope"));
    }

    #[test]
    fn test_message_to_role_content() {
        let (role, content) = ConversationMessage::user("Hello").to_role_content();
        assert_eq!(role, "user");
        assert_eq!(content, "Hello");
    }
}
