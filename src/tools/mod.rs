//! Built-in Tools for Agent Capabilities
//!
//! This module provides the tools the three learning agents call during a
//! tool-calling session.
//!
//! # Module Structure
//!
//! - [`calculator`] - Arithmetic operations
//! - [`reasoning`] - `think` / `analyze` scratchpad tools
//! - [`search`] - Web search through the Exa API
//! - [`learner`] - Learner Profiler tools
//! - [`recommendation`] - Path Recommender tools
//! - [`assistant`] - Learning Assistant tools
//! - [`registry`] - Tool registration, enablement and execution
//!
//! Domain tools never build records themselves: they validate arguments and
//! read or write through a [`LearningStore`](crate::store::LearningStore).
//!
//! # Tool Registry
//!
//! ```ignore
//! let registry = ToolRegistry::with_config(&config, Arc::new(SampleLearningStore::new()));
//! let tools = registry.get_tool_definitions_for(&["identify_skill_gaps".into()]);
//! let gaps = registry
//!     .execute("identify_skill_gaps", json!({"user_id": "u1", "job_role": "Marketing Manager"}))
//!     .await?;
//! ```

/// Declare a tool struct that reads and writes through a shared store.
macro_rules! store_tool {
    ($name:ident) => {
        pub struct $name {
            store: Arc<dyn LearningStore>,
        }

        impl $name {
            pub fn new(store: Arc<dyn LearningStore>) -> Self {
                Self { store }
            }
        }
    };
}

/// Learning Assistant tools.
pub mod assistant;
/// Calculator tool for arithmetic operations.
pub mod calculator;
/// Learner Profiler tools.
pub mod learner;
/// Chain-of-thought scratchpad tools.
pub mod reasoning;
/// Path Recommender tools.
pub mod recommendation;
/// Tool registry for managing available tools.
pub mod registry;
/// Web search tool using Exa.
pub mod search;

use crate::types::{AppError, Result};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Every tool name the registry can provide.
pub const BUILTIN_TOOLS: &[&str] = &[
    // generic
    "calculator",
    "think",
    "analyze",
    "search_exa",
    // learner profiler
    "track_content_interaction",
    "get_learner_behavior_history",
    "calculate_learning_style_score",
    "identify_skill_gaps",
    "get_engagement_metrics",
    "get_learner_profile_from_db",
    // path recommender
    "get_learner_profile",
    "search_content_catalog",
    "calculate_content_relevance_score",
    "build_learning_path",
    "get_next_best_content",
    "log_recommendation",
    "check_prerequisite_completion",
    "get_content_metadata",
    // learning assistant
    "search_edflex_knowledge_base",
    "get_content_summary",
    "search_similar_content",
    "log_chatbot_interaction",
    "get_user_progress",
    "send_encouragement_notification",
    "explain_concept",
    "get_troubleshooting_help",
    "get_learner_context",
];

/// JSON schema for a tool's argument struct, as offered to the model.
pub(crate) fn args_schema<T: JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    let mut value = serde_json::to_value(&schema).unwrap_or_else(|_| {
        serde_json::json!({"type": "object", "properties": {}})
    });
    if let Some(object) = value.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
    }
    value
}

/// Deserialize tool arguments, mapping failures to `InvalidInput`.
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    // Some models send `null` for tools without required arguments
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments for {}: {}", tool, e)))
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize tool result: {}", e)))
}

/// Reject empty identifiers the model sometimes sends.
pub(crate) fn require(tool: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!(
            "{}: '{}' must not be empty",
            tool, field
        )));
    }
    Ok(())
}
