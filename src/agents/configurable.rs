//! Configurable Agent implementation
//!
//! An agent is a definition (identity and prompts) combined with its
//! `[agents.<key>]` configuration: the model it runs on, the tools it may
//! call and the limits of its tool-calling loop.

use crate::agents::definition::AgentDefinition;
use crate::llm::client::TokenUsage;
use crate::llm::coordinator::{
    ConversationMessage, FinishReason, ToolCallRecord, ToolCallingConfig, ToolCoordinator,
};
use crate::llm::LLMClient;
use crate::tools::registry::ToolRegistry;
use crate::types::{AgentKind, Result};
use crate::utils::toml_config::AgentConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Outcome of one agent run.
#[derive(Debug, Clone)]
pub struct AgentRun {
    pub content: String,
    pub tool_calls: Vec<ToolCallRecord>,
    pub iterations: usize,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
}

pub struct ConfigurableAgent {
    definition: AgentDefinition,
    model: String,
    llm: Box<dyn LLMClient>,
    system_prompt: String,
    tool_registry: Arc<ToolRegistry>,
    allowed_tools: Vec<String>,
    max_tool_iterations: usize,
    parallel_tools: bool,
}

impl ConfigurableAgent {
    /// Build an agent from its configuration.
    ///
    /// `allowed_tools` should already exclude tools disabled in `[tools]`.
    pub fn new(
        kind: AgentKind,
        config: &AgentConfig,
        allowed_tools: Vec<String>,
        llm: Box<dyn LLMClient>,
        tool_registry: Arc<ToolRegistry>,
    ) -> Self {
        let definition = AgentDefinition::for_kind(kind);
        let system_prompt = config
            .system_prompt
            .clone()
            .unwrap_or_else(|| definition.system_prompt(&allowed_tools, config.markdown));

        Self {
            definition,
            model: config.model.clone(),
            llm,
            system_prompt,
            tool_registry,
            allowed_tools,
            max_tool_iterations: config.max_tool_iterations,
            parallel_tools: config.parallel_tools,
        }
    }

    pub fn kind(&self) -> AgentKind {
        self.definition.kind
    }

    pub fn definition(&self) -> &AgentDefinition {
        &self.definition
    }

    /// Name of the `[models]` entry the agent runs on
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn allowed_tools(&self) -> &[String] {
        &self.allowed_tools
    }

    pub fn max_tool_iterations(&self) -> usize {
        self.max_tool_iterations
    }

    pub fn parallel_tools(&self) -> bool {
        self.parallel_tools
    }

    /// Whether a tool is both allowed for this agent and enabled
    pub fn can_use_tool(&self, tool_name: &str) -> bool {
        self.allowed_tools.iter().any(|t| t == tool_name) && self.tool_registry.is_enabled(tool_name)
    }

    fn coordinator_config(&self) -> ToolCallingConfig {
        ToolCallingConfig {
            max_iterations: self.max_tool_iterations.max(1),
            parallel_execution: self.parallel_tools,
            tool_timeout: Duration::from_secs(30),
            stop_on_error: false,
        }
    }

    /// Run the agent on `prompt`, continuing the conversation in `history`.
    pub async fn run(self, prompt: &str, history: &[ConversationMessage]) -> Result<AgentRun> {
        let agent_id = self.definition.id;
        let config = self.coordinator_config();
        let coordinator = ToolCoordinator::new(self.llm, self.tool_registry, config)
            .with_allowed_tools(self.allowed_tools);

        let result = coordinator
            .execute_with_history(Some(&self.system_prompt), history, prompt)
            .await?;

        info!(
            agent = agent_id,
            iterations = result.iterations,
            tool_calls = result.tool_calls.len(),
            finish_reason = %result.finish_reason,
            total_tokens = result.total_usage.total_tokens,
            "agent run complete"
        );

        Ok(AgentRun {
            content: result.content,
            tool_calls: result.tool_calls,
            iterations: result.iterations,
            finish_reason: result.finish_reason,
            usage: result.total_usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LLMResponse;
    use crate::store::SampleLearningStore;
    use crate::types::{ToolCall, ToolDefinition};
    use crate::utils::toml_config::EdflexConfig;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Replays scripted responses and remembers the tools it was offered.
    struct ScriptedLLM {
        responses: Mutex<VecDeque<LLMResponse>>,
        offered: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedLLM {
        fn new(responses: Vec<LLMResponse>, offered: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                offered,
            }
        }
    }

    fn reply(content: &str, tool_calls: Vec<ToolCall>) -> LLMResponse {
        LLMResponse {
            content: content.to_string(),
            finish_reason: if tool_calls.is_empty() { "stop" } else { "tool_calls" }.to_string(),
            tool_calls,
            usage: Some(TokenUsage::new(10, 5)),
        }
    }

    #[async_trait]
    impl LLMClient for ScriptedLLM {
        async fn generate(&self, _: &str) -> Result<String> {
            Ok(String::new())
        }
        async fn generate_with_system(&self, _: &str, _: &str) -> Result<String> {
            Ok(String::new())
        }
        async fn generate_with_history(&self, _: &[(String, String)]) -> Result<String> {
            Ok(String::new())
        }
        async fn generate_with_tools_and_history(
            &self,
            _: &[ConversationMessage],
            tools: &[ToolDefinition],
        ) -> Result<LLMResponse> {
            *self.offered.lock() = tools.iter().map(|t| t.name.clone()).collect();
            Ok(self
                .responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| reply("done", vec![])))
        }
        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn registry() -> Arc<ToolRegistry> {
        Arc::new(ToolRegistry::with_config(
            &EdflexConfig::default(),
            Arc::new(SampleLearningStore::new()),
        ))
    }

    #[test]
    fn test_config_system_prompt_overrides_composed_one() {
        let mut config = AgentConfig::stock(AgentKind::LearnerProfiler, "default");
        config.system_prompt = Some("Be brief.".to_string());
        let agent = ConfigurableAgent::new(
            AgentKind::LearnerProfiler,
            &config,
            config.tools.clone(),
            Box::new(ScriptedLLM::new(vec![], Arc::default())),
            registry(),
        );
        assert_eq!(agent.system_prompt(), "Be brief.");
        assert_eq!(agent.model(), "default");
    }

    #[test]
    fn test_can_use_tool_requires_allow_list() {
        let config = AgentConfig::stock(AgentKind::PathRecommender, "default");
        let agent = ConfigurableAgent::new(
            AgentKind::PathRecommender,
            &config,
            config.tools.clone(),
            Box::new(ScriptedLLM::new(vec![], Arc::default())),
            registry(),
        );
        assert!(agent.can_use_tool("build_learning_path"));
        assert!(!agent.can_use_tool("explain_concept"));
        assert!(agent.system_prompt().contains("<your_role>"));
    }

    #[tokio::test]
    async fn test_run_calls_tools_and_reports() {
        let offered = Arc::new(Mutex::new(Vec::new()));
        let llm = ScriptedLLM::new(
            vec![
                reply(
                    "",
                    vec![ToolCall {
                        id: "call_1".to_string(),
                        name: "identify_skill_gaps".to_string(),
                        arguments: serde_json::json!({"user_id": "u1", "job_role": "Marketing Manager"}),
                    }],
                ),
                reply("Top gap: Data Analytics", vec![]),
            ],
            offered.clone(),
        );

        let config = AgentConfig::stock(AgentKind::LearnerProfiler, "default");
        let agent = ConfigurableAgent::new(
            AgentKind::LearnerProfiler,
            &config,
            config.tools.clone(),
            Box::new(llm),
            registry(),
        );

        let run = agent
            .run("Détecter les lacunes de compétences pour user_id: u1", &[])
            .await
            .unwrap();

        assert_eq!(run.content, "Top gap: Data Analytics");
        assert_eq!(run.iterations, 2);
        assert_eq!(run.finish_reason, FinishReason::Stop);
        assert_eq!(run.tool_calls.len(), 1);
        assert!(run.tool_calls[0].success);
        assert_eq!(run.usage.total_tokens, 30);

        let offered = offered.lock();
        assert!(offered.contains(&"identify_skill_gaps".to_string()));
        assert!(!offered.contains(&"explain_concept".to_string()));
    }
}
