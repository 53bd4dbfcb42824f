//! Provider Registry for managing multiple LLM providers
//!
//! This module provides a registry for managing named LLM providers
//! and models configured in `edflex.toml`.

use crate::llm::client::{LLMClient, LLMClientFactoryTrait, Provider};
use crate::types::{AppError, Result};
use crate::utils::toml_config::{ConfigManager, EdflexConfig, ModelConfig, ProviderConfig};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for managing multiple named LLM providers
///
/// Resolves the model -> provider chain declared in configuration and creates
/// clients for it.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderConfig>,
    models: HashMap<String, ModelConfig>,
    default_model: Option<String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider registry from TOML configuration
    pub fn from_config(config: &EdflexConfig) -> Self {
        Self {
            providers: config.providers.clone(),
            models: config.models.clone(),
            default_model: config.default_model_name().map(str::to_string),
        }
    }

    pub fn set_default_model(&mut self, model_name: &str) {
        self.default_model = Some(model_name.to_string());
    }

    pub fn register_provider(&mut self, name: &str, config: ProviderConfig) {
        self.providers.insert(name.to_string(), config);
    }

    pub fn register_model(&mut self, name: &str, config: ModelConfig) {
        self.models.insert(name.to_string(), config);
    }

    pub fn get_provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    pub fn get_model(&self, name: &str) -> Option<&ModelConfig> {
        self.models.get(name)
    }

    /// All model names, sorted
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Resolve a model name to a ready-to-use provider
    pub fn provider_for_model(&self, model_name: &str) -> Result<Provider> {
        let model_config = self.get_model(model_name).ok_or_else(|| {
            AppError::Configuration(format!("Model '{}' not found in configuration", model_name))
        })?;

        let provider_config = self.get_provider(&model_config.provider).ok_or_else(|| {
            AppError::Configuration(format!(
                "Provider '{}' referenced by model '{}' not found",
                model_config.provider, model_name
            ))
        })?;

        Provider::from_model_config(model_config, provider_config)
    }

    /// Create an LLM client for a specific model by name
    pub fn create_client_for_model(&self, model_name: &str) -> Result<Box<dyn LLMClient>> {
        self.provider_for_model(model_name)?.create_client()
    }

    fn default_model_name(&self) -> Result<&str> {
        self.default_model
            .as_deref()
            .ok_or_else(|| AppError::Configuration("No default model configured".into()))
    }

    pub fn create_default_client(&self) -> Result<Box<dyn LLMClient>> {
        self.create_client_for_model(self.default_model_name()?)
    }
}

/// Client factory that follows the live (hot-reloaded) configuration.
#[derive(Clone)]
pub struct ConfigBasedLLMFactory {
    config_manager: Arc<ConfigManager>,
}

impl ConfigBasedLLMFactory {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    fn registry(&self) -> ProviderRegistry {
        ProviderRegistry::from_config(&self.config_manager.config())
    }
}

#[async_trait]
impl LLMClientFactoryTrait for ConfigBasedLLMFactory {
    fn default_provider(&self) -> Result<Provider> {
        let registry = self.registry();
        let model = registry.default_model_name()?.to_string();
        registry.provider_for_model(&model)
    }

    async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        self.registry().create_default_client()
    }

    async fn create_for_model(&self, model_name: &str) -> Result<Box<dyn LLMClient>> {
        self.registry().create_client_for_model(model_name)
    }
}
