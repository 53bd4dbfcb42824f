//! Scratchpad tools that let a model reason step by step between tool calls.
//!
//! Neither tool has side effects: each validates and echoes the step back so
//! it lands in the conversation as a tool result.

use crate::tools::registry::Tool;
use crate::tools::{args_schema, parse_args, require, to_json};
use crate::types::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_CONFIDENCE: f64 = 0.8;

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

fn default_next_action() -> String {
    "continue".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ThinkArgs {
    /// Short title for this reasoning step
    title: String,
    /// The thought: what you know, what is missing, what to do next
    thought: String,
    /// Action you intend to take after this step
    #[serde(default)]
    action: Option<String>,
    /// Confidence in this step, 0.0 to 1.0
    #[serde(default = "default_confidence")]
    confidence: f64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AnalyzeArgs {
    /// Short title for this analysis step
    title: String,
    /// The result being analyzed (usually a tool output)
    result: String,
    /// What the result means for the task
    analysis: String,
    /// One of continue, validate, final_answer
    #[serde(default = "default_next_action")]
    next_action: String,
    #[serde(default = "default_confidence")]
    confidence: f64,
}

/// A recorded reasoning step.
#[derive(Debug, Clone, Serialize)]
pub struct ReasoningStep {
    pub kind: &'static str,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
    pub confidence: f64,
}

fn check_confidence(tool: &str, confidence: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&confidence) {
        return Err(crate::types::AppError::InvalidInput(format!(
            "{}: confidence must be between 0.0 and 1.0",
            tool
        )));
    }
    Ok(confidence)
}

pub struct ThinkTool;

#[async_trait]
impl Tool for ThinkTool {
    fn name(&self) -> &str {
        "think"
    }

    fn description(&self) -> &str {
        "Use as a scratchpad to reason about the question and plan the next steps before calling other tools or answering"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<ThinkArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: ThinkArgs = parse_args(self.name(), args)?;
        require(self.name(), "title", &args.title)?;

        to_json(&ReasoningStep {
            kind: "think",
            title: args.title,
            thought: Some(args.thought),
            result: None,
            analysis: None,
            next_action: args.action,
            confidence: check_confidence(self.name(), args.confidence)?,
        })
    }
}

pub struct AnalyzeTool;

#[async_trait]
impl Tool for AnalyzeTool {
    fn name(&self) -> &str {
        "analyze"
    }

    fn description(&self) -> &str {
        "Analyze the result of a previous step and decide whether to continue, validate or give the final answer"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<AnalyzeArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: AnalyzeArgs = parse_args(self.name(), args)?;
        require(self.name(), "title", &args.title)?;

        to_json(&ReasoningStep {
            kind: "analyze",
            title: args.title,
            thought: None,
            result: Some(args.result),
            analysis: Some(args.analysis),
            next_action: Some(args.next_action),
            confidence: check_confidence(self.name(), args.confidence)?,
        })
    }
}
