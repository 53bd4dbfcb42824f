//! API request handlers.
//!
//! Handlers validate the request, build the agent prompt, run a freshly
//! created agent and wrap its answer in the response envelope.

/// Agent listing.
pub mod agents;
/// Learning Assistant questions and conversations.
pub mod assistant;
/// Service health.
pub mod health;
/// Learner Profiler actions.
pub mod profiler;
/// Path Recommender actions.
pub mod recommender;

use crate::AppState;
use crate::llm::coordinator::ConversationMessage;
use crate::types::{AgentKind, AppError, Result};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde_json::Value;
use tracing::debug;

/// Characters of an agent answer included in debug logs.
const LOG_PREVIEW_CHARS: usize = 500;

/// Unwrap a JSON body, turning extractor rejections into 400 responses.
pub(crate) fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

/// A required, non-empty string field.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::InvalidInput(format!("{} is required", field)))
}

/// A learner id as sent by the client.
///
/// Any truthy scalar is accepted: strings, non-zero numbers and `true`.
/// Returns the id as it appears in prompts together with the raw value,
/// which responses echo back unchanged.
pub(crate) fn required_user_id(value: Option<Value>) -> Result<(String, Value)> {
    let missing = || AppError::InvalidInput("user_id is required".to_string());
    let value = value.ok_or_else(missing)?;

    let rendered = match &value {
        Value::Null => return Err(missing()),
        Value::Bool(false) => return Err(missing()),
        Value::Bool(true) => "True".to_string(),
        Value::String(s) if s.is_empty() => return Err(missing()),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64() == Some(0.0) => return Err(missing()),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.is_empty() => return Err(missing()),
        Value::Object(fields) if fields.is_empty() => return Err(missing()),
        Value::Array(_) | Value::Object(_) => {
            return Err(AppError::InvalidInput(
                "user_id must be a string or a number".to_string(),
            ));
        }
    };
    Ok((rendered, value))
}

/// Create the agent, run it and log its answer.
pub(crate) async fn run_agent(
    state: &AppState,
    kind: AgentKind,
    prompt: &str,
    history: &[ConversationMessage],
) -> Result<String> {
    let agent = state.agent_registry.create_agent(kind).await?;
    let run = agent.run(prompt, history).await?;

    let preview: String = run.content.chars().take(LOG_PREVIEW_CHARS).collect();
    debug!(
        agent = kind.key(),
        length = run.content.chars().count(),
        iterations = run.iterations,
        tool_calls = run.tool_calls.len(),
        preview = %preview,
        "agent response"
    );

    Ok(run.content)
}
