use crate::store::LearningStore;
use crate::tools::{assistant, calculator, learner, reasoning, recommendation, search};
use crate::types::{AppError, Result, ToolDefinition};
use crate::utils::toml_config::{
    ConfigManager, DEFAULT_TEXT_LENGTH_LIMIT, EdflexConfig, ToolConfig,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    async fn execute(&self, args: Value) -> Result<Value>;
}

struct RegisteredTool {
    tool: Arc<dyn Tool>,
    /// Cleared when the tool cannot run at all, e.g. a missing API key
    available: bool,
}

/// Where `[tools.<name>]` settings are read from.
enum ToolSettings {
    Fixed(HashMap<String, ToolConfig>),
    Live(Arc<ConfigManager>),
}

impl ToolSettings {
    fn get(&self, name: &str) -> Option<ToolConfig> {
        match self {
            ToolSettings::Fixed(tools) => tools.get(name).cloned(),
            ToolSettings::Live(manager) => manager.config().get_tool(name).cloned(),
        }
    }
}

/// Named tools with their enablement and timeouts.
///
/// Listing order is alphabetical so the definitions offered to the model are
/// stable across requests. A registry built with [`ToolRegistry::with_config_manager`]
/// follows `enabled` and `timeout_secs` changes made by a config reload.
pub struct ToolRegistry {
    tools: BTreeMap<String, RegisteredTool>,
    settings: ToolSettings,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: BTreeMap::new(),
            settings: ToolSettings::Fixed(HashMap::new()),
        }
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every built-in tool, reading tool settings from the live
    /// configuration on each lookup.
    ///
    /// The Exa API key is resolved once here; a reload cannot supply it later.
    pub fn with_config_manager(manager: Arc<ConfigManager>, store: Arc<dyn LearningStore>) -> Self {
        let mut registry = Self::with_config(&manager.config(), store);
        registry.settings = ToolSettings::Live(manager);
        registry
    }

    /// Register every built-in tool with a fixed copy of the `[tools.<name>]` settings.
    ///
    /// `search_exa` is registered disabled when its API key is missing.
    pub fn with_config(config: &EdflexConfig, store: Arc<dyn LearningStore>) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(calculator::Calculator));
        registry.register(Arc::new(reasoning::ThinkTool));
        registry.register(Arc::new(reasoning::AnalyzeTool));

        for tool in learner::tools(&store) {
            registry.register(tool);
        }
        for tool in recommendation::tools(&store) {
            registry.register(tool);
        }
        for tool in assistant::tools(&store) {
            registry.register(tool);
        }

        let exa_config = config.get_tool("search_exa");
        let key_env = exa_config
            .and_then(|t| t.api_key_env.clone())
            .unwrap_or_else(|| search::DEFAULT_API_KEY_ENV.to_string());
        let text_length_limit = exa_config
            .and_then(|t| t.text_length_limit)
            .unwrap_or(DEFAULT_TEXT_LENGTH_LIMIT);
        let api_key = config.resolve_env(&key_env);
        let has_key = api_key.is_some();
        registry.register(Arc::new(search::ExaSearchTool::new(
            api_key.unwrap_or_default(),
            text_length_limit,
        )));
        if !has_key {
            warn!(
                env = %key_env,
                "Exa API key not set; search_exa is disabled"
            );
            registry.set_enabled("search_exa", false);
        }

        for name in config.tools.keys() {
            if !registry.has_tool(name) {
                warn!(tool = %name, "Configuration names a tool that does not exist");
            }
        }
        registry.settings = ToolSettings::Fixed(config.tools.clone());

        debug!(tools = registry.tools.len(), "Tool registry ready");
        registry
    }

    /// Register (or replace) a tool. Its settings come from configuration.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(
            tool.name().to_string(),
            RegisteredTool {
                tool,
                available: true,
            },
        );
    }

    fn entry_enabled(&self, name: &str, entry: &RegisteredTool) -> bool {
        entry.available && self.settings.get(name).is_none_or(|tc| tc.enabled)
    }

    fn definition(tool: &dyn Tool) -> ToolDefinition {
        ToolDefinition {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            parameters: tool.parameters_schema(),
        }
    }

    /// Definitions of every enabled tool
    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .filter(|(name, entry)| self.entry_enabled(name, entry))
            .map(|(_, entry)| Self::definition(entry.tool.as_ref()))
            .collect()
    }

    /// Definitions for the named tools that are registered and enabled, in the given order
    pub fn get_tool_definitions_for(&self, names: &[String]) -> Vec<ToolDefinition> {
        names
            .iter()
            .filter_map(|name| self.tools.get(name).map(|entry| (name, entry)))
            .filter(|(name, entry)| self.entry_enabled(name, entry))
            .map(|(_, entry)| Self::definition(entry.tool.as_ref()))
            .collect()
    }

    pub async fn execute(&self, name: &str, args: Value) -> Result<Value> {
        let entry = self
            .tools
            .get(name)
            .ok_or_else(|| AppError::NotFound(format!("Tool not found: {}", name)))?;

        if !self.entry_enabled(name, entry) {
            return Err(AppError::InvalidInput(format!("Tool '{}' is disabled", name)));
        }

        entry.tool.execute(args).await
    }

    /// Get a list of all registered tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.tools
            .get(name)
            .is_some_and(|entry| self.entry_enabled(name, entry))
    }

    /// Mark a tool as runnable or not, independent of configuration.
    /// Returns false when no such tool is registered.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.tools.get_mut(name) {
            Some(entry) => {
                entry.available = enabled;
                true
            }
            None => false,
        }
    }

    /// Per-tool timeout from configuration, if any
    pub fn timeout_for(&self, name: &str) -> Option<Duration> {
        if !self.has_tool(name) {
            return None;
        }
        self.settings
            .get(name)
            .map(|tc| Duration::from_secs(tc.timeout_secs))
    }

    /// Enabled state of every tool, for diagnostics
    pub fn status(&self) -> HashMap<String, bool> {
        self.tools
            .iter()
            .map(|(name, entry)| (name.clone(), self.entry_enabled(name, entry)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SampleLearningStore;
    use crate::tools::BUILTIN_TOOLS;
    use crate::utils::toml_config::ToolConfig;

    fn configured_registry(config: &EdflexConfig) -> ToolRegistry {
        ToolRegistry::with_config(config, Arc::new(SampleLearningStore::new()))
    }

    fn config_without_exa_key() -> EdflexConfig {
        let mut config = EdflexConfig::default();
        config.tools.insert(
            "search_exa".to_string(),
            ToolConfig {
                api_key_env: Some("EDFLEX_TEST_NO_EXA_KEY".to_string()),
                ..ToolConfig::default()
            },
        );
        config
    }

    #[test]
    fn test_registry_creation() {
        let registry = ToolRegistry::new();
        assert!(registry.tool_names().is_empty());
    }

    #[test]
    fn test_with_config_registers_every_builtin() {
        let registry = configured_registry(&config_without_exa_key());
        for name in BUILTIN_TOOLS {
            assert!(registry.has_tool(name), "missing {}", name);
        }
        assert_eq!(registry.tool_names().len(), BUILTIN_TOOLS.len());
    }

    #[test]
    fn test_missing_exa_key_disables_search() {
        let registry = configured_registry(&config_without_exa_key());
        assert!(registry.has_tool("search_exa"));
        assert!(!registry.is_enabled("search_exa"));
        assert!(
            registry
                .get_tool_definitions_for(&["search_exa".to_string(), "think".to_string()])
                .iter()
                .all(|d| d.name != "search_exa")
        );
    }

    #[test]
    fn test_config_disables_tool_and_sets_timeout() {
        let mut config = config_without_exa_key();
        config.tools.insert(
            "calculator".to_string(),
            ToolConfig {
                enabled: false,
                timeout_secs: 5,
                ..ToolConfig::default()
            },
        );
        config.tools.insert(
            "explain_concept".to_string(),
            ToolConfig {
                timeout_secs: 2,
                ..ToolConfig::default()
            },
        );

        let registry = configured_registry(&config);
        assert!(!registry.is_enabled("calculator"));
        assert_eq!(registry.timeout_for("explain_concept"), Some(Duration::from_secs(2)));
        assert_eq!(registry.timeout_for("think"), None);
    }

    #[test]
    fn test_definitions_for_keep_requested_order() {
        let registry = configured_registry(&config_without_exa_key());
        let names: Vec<String> = registry
            .get_tool_definitions_for(&[
                "identify_skill_gaps".to_string(),
                "think".to_string(),
                "unknown".to_string(),
            ])
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["identify_skill_gaps", "think"]);
    }

    #[test]
    fn test_definitions_have_object_schemas() {
        let registry = configured_registry(&config_without_exa_key());
        for def in registry.get_tool_definitions() {
            assert!(!def.description.is_empty(), "{} has no description", def.name);
            assert_eq!(def.parameters["type"], "object", "{}", def.name);
        }
    }

    #[tokio::test]
    async fn test_calculator_execution() {
        let registry = configured_registry(&config_without_exa_key());
        let value = registry
            .execute(
                "calculator",
                serde_json::json!({"operation": "add", "a": 5.0, "b": 3.0}),
            )
            .await
            .unwrap();
        assert_eq!(value["result"], 8.0);
    }

    #[tokio::test]
    async fn test_nonexistent_and_disabled_tools() {
        let mut registry = configured_registry(&config_without_exa_key());

        let err = registry
            .execute("nonexistent_tool", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Tool not found: nonexistent_tool"));

        assert!(registry.set_enabled("think", false));
        let err = registry
            .execute("think", serde_json::json!({"title": "t", "thought": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(!registry.set_enabled("nope", false));
    }
}
