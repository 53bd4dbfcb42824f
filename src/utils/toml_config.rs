//! TOML-based configuration for the Edflex learning server
//!
//! This module provides declarative configuration for providers, models, tools
//! and the three learning agents via a TOML file (`edflex.toml`).
//!
//! Every section is optional. A missing file or an empty one yields the stock
//! deployment: one xAI provider serving `grok-3` and the three agents with
//! their standard tool sets.
//!
//! # Hot Reloading
//!
//! Configuration changes are automatically detected and applied at runtime.
//! Use `ConfigManager` for thread-safe access to the current configuration.

use crate::agents::definition::default_tools;
use crate::tools::BUILTIN_TOOLS;
use crate::types::AgentKind;
use arc_swap::ArcSwap;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "edflex.toml";

/// Root configuration structure loaded from edflex.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdflexConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Named LLM provider configurations
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,

    /// Named model configurations that reference providers
    #[serde(default = "default_models")]
    pub models: HashMap<String, ModelConfig>,

    /// Per-tool overrides. Built-in tools need no entry to be usable.
    #[serde(default = "default_tool_configs")]
    pub tools: HashMap<String, ToolConfig>,

    /// Agent configurations keyed by agent key (`learner_profiler`, ...)
    #[serde(default = "default_agents")]
    pub agents: HashMap<String, AgentConfig>,
}

impl Default for EdflexConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            providers: default_providers(),
            models: default_models(),
            tools: default_tool_configs(),
            agents: default_agents(),
        }
    }
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= Provider Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// xAI (Grok) through its OpenAI-compatible API
    #[serde(rename = "xai")]
    XAI {
        /// Environment variable containing API key
        #[serde(default = "default_xai_key_env")]
        api_key_env: String,
        #[serde(default = "default_xai_base")]
        api_base: String,
        #[serde(default = "default_xai_model")]
        default_model: String,
    },
    OpenAI {
        api_key_env: String,
        #[serde(default = "default_openai_base")]
        api_base: String,
        default_model: String,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        default_model: String,
    },
}

impl ProviderConfig {
    /// Environment variable holding the API key, if the provider needs one.
    pub fn api_key_env(&self) -> Option<&str> {
        match self {
            ProviderConfig::XAI { api_key_env, .. } | ProviderConfig::OpenAI { api_key_env, .. } => {
                Some(api_key_env.as_str())
            }
            ProviderConfig::Ollama { .. } => None,
        }
    }
}

fn default_xai_key_env() -> String {
    "XAI_API_KEY".to_string()
}

fn default_xai_base() -> String {
    "https://api.x.ai/v1".to_string()
}

fn default_xai_model() -> String {
    "grok-3".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    HashMap::from([(
        "xai".to_string(),
        ProviderConfig::XAI {
            api_key_env: default_xai_key_env(),
            api_base: default_xai_base(),
            default_model: default_xai_model(),
        },
    )])
}

// ============= Model Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Reference to a provider name defined in [providers]
    pub provider: String,

    /// Model name/identifier to use with the provider
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_model_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_model_max_tokens() -> u32 {
    4096
}

/// Name of the model agents fall back to.
pub const DEFAULT_MODEL: &str = "default";

fn default_models() -> HashMap<String, ModelConfig> {
    HashMap::from([(
        DEFAULT_MODEL.to_string(),
        ModelConfig {
            provider: "xai".to_string(),
            model: default_xai_model(),
            temperature: default_temperature(),
            max_tokens: default_model_max_tokens(),
        },
    )])
}

// ============= Tool Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_tool_timeout")]
    pub timeout_secs: u64,

    /// Environment variable with the tool's API key (web search)
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Maximum characters of page text returned per search result
    #[serde(default)]
    pub text_length_limit: Option<usize>,
}

fn default_true() -> bool {
    true
}

fn default_tool_timeout() -> u64 {
    30
}

/// Characters of page text kept per web search result.
pub const DEFAULT_TEXT_LENGTH_LIMIT: usize = 500;

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: default_tool_timeout(),
            api_key_env: None,
            text_length_limit: None,
        }
    }
}

fn default_tool_configs() -> HashMap<String, ToolConfig> {
    HashMap::from([(
        "search_exa".to_string(),
        ToolConfig {
            api_key_env: Some("EXA_API_KEY".to_string()),
            text_length_limit: Some(DEFAULT_TEXT_LENGTH_LIMIT),
            ..ToolConfig::default()
        },
    )])
}

// ============= Agent Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    /// Reference to a model name defined in [models]
    pub model: String,

    /// Replaces the composed system prompt when set
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// List of tool names this agent can use
    #[serde(default)]
    pub tools: Vec<String>,

    /// Maximum tool calling iterations
    #[serde(default = "default_max_tool_iterations")]
    pub max_tool_iterations: usize,

    /// Whether to execute tools in parallel
    #[serde(default = "default_true")]
    pub parallel_tools: bool,

    /// Ask the model to format answers as markdown
    #[serde(default = "default_true")]
    pub markdown: bool,
}

fn default_max_tool_iterations() -> usize {
    10
}

impl AgentConfig {
    /// Stock configuration for an agent running on `model`.
    pub fn stock(kind: AgentKind, model: &str) -> Self {
        Self {
            model: model.to_string(),
            system_prompt: None,
            tools: default_tools(kind).iter().map(|t| t.to_string()).collect(),
            max_tool_iterations: default_max_tool_iterations(),
            parallel_tools: true,
            markdown: true,
        }
    }
}

fn default_agents() -> HashMap<String, AgentConfig> {
    AgentKind::ALL
        .into_iter()
        .map(|kind| (kind.key().to_string(), AgentConfig::stock(kind, DEFAULT_MODEL)))
        .collect()
}

// ============= Configuration Loading & Validation =============

/// Configuration warnings that don't prevent operation but may indicate issues
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub kind: ConfigWarningKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarningKind {
    UnusedProvider,
    UnusedModel,
    UnusedTool,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),

    #[error("Provider '{0}' referenced by model '{1}' does not exist")]
    MissingProvider(String, String),

    #[error("Model '{0}' referenced by agent '{1}' does not exist")]
    MissingModel(String, String),

    #[error("Tool '{0}' referenced by agent '{1}' does not exist")]
    MissingTool(String, String),

    #[error("Unknown agent '{0}' (expected one of learner_profiler, path_recommender, learning_assistant)")]
    UnknownAgent(String),

    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),
}

impl EdflexConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Parse without validating
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }

        for provider in self.providers.values() {
            if let Some(env) = provider.api_key_env() {
                self.validate_env_var(env)?;
            }
        }

        for (model_name, model_config) in &self.models {
            if !self.providers.contains_key(&model_config.provider) {
                return Err(ConfigError::MissingProvider(
                    model_config.provider.clone(),
                    model_name.clone(),
                ));
            }
        }

        for (agent_name, agent_config) in &self.agents {
            if AgentKind::from_key(agent_name).is_none() {
                return Err(ConfigError::UnknownAgent(agent_name.clone()));
            }

            if !self.models.contains_key(&agent_config.model) {
                return Err(ConfigError::MissingModel(
                    agent_config.model.clone(),
                    agent_name.clone(),
                ));
            }

            for tool_name in &agent_config.tools {
                if !self.is_known_tool(tool_name) {
                    return Err(ConfigError::MissingTool(
                        tool_name.clone(),
                        agent_name.clone(),
                    ));
                }
            }

            if agent_config.max_tool_iterations == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "agents.{}.max_tool_iterations must be at least 1",
                    agent_name
                )));
            }
        }

        Ok(())
    }

    /// Validate configuration with warnings for unused items
    pub fn validate_with_warnings(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(self.check_unused_providers());
        warnings.extend(self.check_unused_models());
        warnings.extend(self.check_unused_tools());

        Ok(warnings)
    }

    fn check_unused_providers(&self) -> Vec<ConfigWarning> {
        let referenced: BTreeSet<_> = self.models.values().map(|m| m.provider.as_str()).collect();

        self.providers
            .keys()
            .filter(|name| !referenced.contains(name.as_str()))
            .map(|name| ConfigWarning {
                kind: ConfigWarningKind::UnusedProvider,
                message: format!(
                    "Provider '{}' is defined but not referenced by any model",
                    name
                ),
            })
            .collect()
    }

    fn check_unused_models(&self) -> Vec<ConfigWarning> {
        let referenced: BTreeSet<_> = AgentKind::ALL
            .into_iter()
            .map(|kind| self.agent_config(kind).model)
            .collect();

        self.models
            .keys()
            .filter(|name| !referenced.contains(name.as_str()))
            .map(|name| ConfigWarning {
                kind: ConfigWarningKind::UnusedModel,
                message: format!(
                    "Model '{}' is defined but not referenced by any agent",
                    name
                ),
            })
            .collect()
    }

    fn check_unused_tools(&self) -> Vec<ConfigWarning> {
        let referenced: BTreeSet<_> = AgentKind::ALL
            .into_iter()
            .flat_map(|kind| self.agent_config(kind).tools)
            .collect();

        self.tools
            .keys()
            .filter(|name| !referenced.contains(name.as_str()))
            .map(|name| ConfigWarning {
                kind: ConfigWarningKind::UnusedTool,
                message: format!("Tool '{}' is defined but not referenced by any agent", name),
            })
            .collect()
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    fn is_known_tool(&self, name: &str) -> bool {
        BUILTIN_TOOLS.contains(&name) || self.tools.contains_key(name)
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok().filter(|v| !v.is_empty())
    }

    /// Get provider by name
    pub fn get_provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// Get model by name
    pub fn get_model(&self, name: &str) -> Option<&ModelConfig> {
        self.models.get(name)
    }

    /// Get tool config by name
    pub fn get_tool(&self, name: &str) -> Option<&ToolConfig> {
        self.tools.get(name)
    }

    /// Model agents use when their section is missing: `default` if
    /// defined, otherwise the alphabetically first model.
    pub fn default_model_name(&self) -> Option<&str> {
        if self.models.contains_key(DEFAULT_MODEL) {
            return Some(DEFAULT_MODEL);
        }
        self.models.keys().map(|k| k.as_str()).min()
    }

    /// Effective configuration for an agent, falling back to the stock one.
    pub fn agent_config(&self, kind: AgentKind) -> AgentConfig {
        self.agents.get(kind.key()).cloned().unwrap_or_else(|| {
            AgentConfig::stock(kind, self.default_model_name().unwrap_or(DEFAULT_MODEL))
        })
    }

    /// Whether a tool is enabled (tools without an entry are enabled)
    pub fn tool_enabled(&self, name: &str) -> bool {
        self.get_tool(name).is_none_or(|tc| tc.enabled)
    }

    /// Enabled tools for an agent
    pub fn agent_tools(&self, kind: AgentKind) -> Vec<String> {
        self.agent_config(kind)
            .tools
            .into_iter()
            .filter(|t| self.tool_enabled(t))
            .collect()
    }
}

// ============= Hot Reloading Configuration Manager =============

/// Thread-safe configuration manager with hot reloading support
pub struct ConfigManager {
    config: Arc<ArcSwap<EdflexConfig>>,
    config_path: PathBuf,
    watcher: RwLock<Option<RecommendedWatcher>>,
    reload_tx: Option<mpsc::UnboundedSender<()>>,
}

impl ConfigManager {
    /// Create a new configuration manager and load the initial config
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        // Absolute path for reliable file watching
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(ConfigError::ReadError)?
                .join(path)
        };

        let config = EdflexConfig::load(&path)?;

        Ok(Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: path,
            watcher: RwLock::new(None),
            reload_tx: None,
        })
    }

    /// Create a config manager directly from a config (useful for testing)
    /// This won't have file watching capabilities.
    pub fn from_config(config: EdflexConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            watcher: RwLock::new(None),
            reload_tx: None,
        }
    }

    /// Get the current configuration (lockless read)
    pub fn config(&self) -> Arc<EdflexConfig> {
        self.config.load_full()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Manually reload the configuration from disk
    pub fn reload(&self) -> Result<(), ConfigError> {
        info!(path = ?self.config_path, "Reloading configuration");

        let new_config = EdflexConfig::load(&self.config_path)?;
        self.config.store(Arc::new(new_config));

        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Start watching for configuration file changes
    pub fn start_watching(&mut self) -> Result<(), ConfigError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        self.reload_tx = Some(tx.clone());

        let config_path = self.config_path.clone();
        let config_arc = Arc::clone(&self.config);
        let file_name = config_path.file_name().map(|n| n.to_os_string());

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_config && (event.kind.is_modify() || event.kind.is_create()) {
                        // Debounced in the receiver
                        let _ = tx.send(());
                    }
                }
                Err(e) => {
                    error!("Config watcher error: {:?}", e);
                }
            }
        })?;

        if let Some(parent) = self.config_path.parent() {
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
        }

        *self.watcher.write() = Some(watcher);

        tokio::spawn(async move {
            let debounce_duration = Duration::from_millis(500);
            let mut last_reload: Option<std::time::Instant> = None;

            while rx.recv().await.is_some() {
                if last_reload.is_some_and(|at| at.elapsed() < debounce_duration) {
                    continue;
                }

                // Let the writer finish
                tokio::time::sleep(Duration::from_millis(100)).await;

                match EdflexConfig::load(&config_path) {
                    Ok(new_config) => {
                        config_arc.store(Arc::new(new_config));
                        info!("Configuration hot-reloaded successfully");
                        last_reload = Some(std::time::Instant::now());
                    }
                    Err(e) => {
                        warn!(
                            "Failed to hot-reload config: {}. Keeping previous config.",
                            e
                        );
                    }
                }
            }
        });

        info!("Configuration hot-reload watcher started");
        Ok(())
    }

    /// Stop watching for configuration changes
    pub fn stop_watching(&self) {
        *self.watcher.write() = None;
        info!("Configuration hot-reload watcher stopped");
    }
}

impl Clone for ConfigManager {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            config_path: self.config_path.clone(),
            watcher: RwLock::new(None), // Watcher is not cloned
            reload_tx: self.reload_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[server]
host = "127.0.0.1"
port = 3000
log_level = "debug"

[providers.local]
type = "ollama"
base_url = "http://localhost:11434"
default_model = "llama3.2"

[models.default]
provider = "local"
model = "llama3.2"
temperature = 0.2
max_tokens = 1024

[tools.calculator]
enabled = false

[agents.learner_profiler]
model = "default"
tools = ["think", "calculator", "identify_skill_gaps"]
max_tool_iterations = 5
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config = EdflexConfig::from_toml_str(&create_test_config()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.models["default"].temperature, 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_stock_deployment() {
        let config = EdflexConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(matches!(
            config.get_provider("xai"),
            Some(ProviderConfig::XAI { default_model, .. }) if default_model == "grok-3"
        ));
        assert_eq!(config.agents.len(), 3);
        assert_eq!(
            config.get_tool("search_exa").and_then(|t| t.text_length_limit),
            Some(DEFAULT_TEXT_LENGTH_LIMIT)
        );
    }

    #[test]
    fn test_missing_agent_falls_back_to_stock() {
        let config = EdflexConfig::from_toml_str(&create_test_config()).unwrap();
        let assistant = config.agent_config(AgentKind::LearningAssistant);
        assert_eq!(assistant.model, "default");
        assert!(assistant.tools.iter().any(|t| t == "explain_concept"));
        assert!(assistant.markdown);
    }

    #[test]
    fn test_agent_tools_skip_disabled() {
        let config = EdflexConfig::from_toml_str(&create_test_config()).unwrap();
        let tools = config.agent_tools(AgentKind::LearnerProfiler);
        assert_eq!(tools, vec!["think", "identify_skill_gaps"]);
    }

    #[test]
    fn test_validation_missing_provider() {
        let config = EdflexConfig::from_toml_str(
            r#"
[providers.local]
type = "ollama"
default_model = "llama3.2"

[models.default]
provider = "nowhere"
model = "llama3.2"
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingProvider(p, m) if p == "nowhere" && m == "default"));
    }

    #[test]
    fn test_validation_missing_tool() {
        let mut config = EdflexConfig::from_toml_str(&create_test_config()).unwrap();
        config
            .agents
            .get_mut("learner_profiler")
            .unwrap()
            .tools
            .push("teleport".to_string());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingTool(t, _) if t == "teleport"));
    }

    #[test]
    fn test_validation_unknown_agent() {
        let config = EdflexConfig::from_toml_str(
            r#"
[providers.local]
type = "ollama"
default_model = "llama3.2"

[models.default]
provider = "local"
model = "llama3.2"

[agents.router]
model = "default"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::UnknownAgent(name) if name == "router"
        ));
    }

    #[test]
    fn test_validation_missing_env_var() {
        let config = EdflexConfig::from_toml_str(
            r#"
[providers.cloud]
type = "openai"
api_key_env = "EDFLEX_TEST_UNSET_OPENAI_KEY"
default_model = "gpt-4o-mini"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::MissingEnvVar(name) if name == "EDFLEX_TEST_UNSET_OPENAI_KEY"
        ));
    }

    #[test]
    fn test_unused_warnings() {
        let mut config = EdflexConfig::from_toml_str(&create_test_config()).unwrap();
        config.providers.insert(
            "spare".to_string(),
            ProviderConfig::Ollama {
                base_url: default_ollama_url(),
                default_model: "mistral".to_string(),
            },
        );
        config.tools.insert("shadow".to_string(), ToolConfig::default());
        let warnings = config.validate_with_warnings().unwrap();

        assert!(warnings
            .iter()
            .any(|w| w.kind == ConfigWarningKind::UnusedProvider && w.message.contains("spare")));
        assert!(warnings
            .iter()
            .any(|w| w.kind == ConfigWarningKind::UnusedTool && w.message.contains("shadow")));
    }

    #[test]
    fn test_default_model_name() {
        let mut config = EdflexConfig::default();
        assert_eq!(config.default_model_name(), Some("default"));

        let model = config.models.remove("default").unwrap();
        config.models.insert("zeta".to_string(), model.clone());
        config.models.insert("alpha".to_string(), model);
        assert_eq!(config.default_model_name(), Some("alpha"));
    }

    #[test]
    fn test_config_manager_from_config() {
        let manager = ConfigManager::from_config(EdflexConfig::default());
        let config = manager.config();
        assert_eq!(config.server.port, 5000);

        let cloned = manager.clone();
        assert_eq!(cloned.config().server.port, 5000);
    }
}
