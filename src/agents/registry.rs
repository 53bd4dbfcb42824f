//! Agent Registry
//!
//! Creates agents from the live configuration. Each request gets a fresh
//! agent so configuration reloads take effect without a restart.

use crate::agents::configurable::ConfigurableAgent;
use crate::agents::definition::AgentDefinition;
use crate::llm::LLMClientFactoryTrait;
use crate::tools::registry::ToolRegistry;
use crate::types::{AgentKind, AppError, Result};
use crate::utils::toml_config::ConfigManager;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;

/// What `GET /api/agents` reports about an agent.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AgentSummary {
    pub id: String,
    pub key: String,
    pub name: String,
    pub role: String,
    pub model: String,
    pub tools: Vec<String>,
}

#[derive(Clone)]
pub struct AgentRegistry {
    config_manager: Arc<ConfigManager>,
    llm_factory: Arc<dyn LLMClientFactoryTrait>,
    tool_registry: Arc<ToolRegistry>,
}

impl AgentRegistry {
    pub fn new(
        config_manager: Arc<ConfigManager>,
        llm_factory: Arc<dyn LLMClientFactoryTrait>,
        tool_registry: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            config_manager,
            llm_factory,
            tool_registry,
        }
    }

    /// Keys of every servable agent
    pub fn agent_names(&self) -> Vec<String> {
        AgentKind::ALL.iter().map(|k| k.key().to_string()).collect()
    }

    pub fn has_agent(&self, name: &str) -> bool {
        AgentKind::from_key(name).is_some()
    }

    pub fn definition(&self, kind: AgentKind) -> AgentDefinition {
        AgentDefinition::for_kind(kind)
    }

    /// Create an agent by its configuration key
    pub async fn create_agent_by_name(&self, name: &str) -> Result<ConfigurableAgent> {
        let kind = AgentKind::from_key(name)
            .ok_or_else(|| AppError::NotFound(format!("Agent '{}' not found", name)))?;
        self.create_agent(kind).await
    }

    /// Create an agent with an LLM client for its configured model.
    pub async fn create_agent(&self, kind: AgentKind) -> Result<ConfigurableAgent> {
        let config = self.config_manager.config();
        let agent_config = config.agent_config(kind);
        let allowed_tools = config.agent_tools(kind);

        let llm = self
            .llm_factory
            .create_for_model(&agent_config.model)
            .await?;

        debug!(
            agent = kind.key(),
            model = %agent_config.model,
            tools = allowed_tools.len(),
            "created agent"
        );

        Ok(ConfigurableAgent::new(
            kind,
            &agent_config,
            allowed_tools,
            llm,
            self.tool_registry.clone(),
        ))
    }

    /// Summaries of every agent, in a stable order
    pub fn summaries(&self) -> Vec<AgentSummary> {
        let config = self.config_manager.config();
        AgentKind::ALL
            .into_iter()
            .map(|kind| {
                let definition = AgentDefinition::for_kind(kind);
                AgentSummary {
                    id: definition.id.to_string(),
                    key: kind.key().to_string(),
                    name: definition.name.to_string(),
                    role: definition.role.to_string(),
                    model: config.agent_config(kind).model,
                    tools: config.agent_tools(kind),
                }
            })
            .collect()
    }

    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }
}
