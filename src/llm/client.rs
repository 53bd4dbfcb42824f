//! LLM client abstractions and provider selection
//!
//! Every supported provider speaks the OpenAI chat-completions protocol, so a
//! single HTTP client ([`super::openai::OpenAICompatibleClient`]) serves them all:
//! - **xAI**: Grok models, the stock deployment
//! - **OpenAI**: OpenAI and any compatible gateway
//! - **Ollama**: local inference through Ollama's `/v1` endpoint

use crate::llm::coordinator::ConversationMessage;
use crate::types::{AppError, Result, ToolCall, ToolDefinition};
use crate::utils::toml_config::{ModelConfig, ProviderConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Generic LLM client trait for provider abstraction
///
/// All LLM providers implement this trait, allowing for easy swapping
/// between providers without changing application code.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with system prompt
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Generate with conversation history
    async fn generate_with_history(
        &self,
        messages: &[(String, String)], // (role, content) pairs
    ) -> Result<String>;

    /// One round-trip of a tool-calling conversation
    async fn generate_with_tools_and_history(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolDefinition],
    ) -> Result<LLMResponse>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Sum of two usage reports.
    pub fn add(&self, other: &TokenUsage) -> Self {
        Self::new(
            self.prompt_tokens + other.prompt_tokens,
            self.completion_tokens + other.completion_tokens,
        )
    }
}

/// Response from an LLM generation request
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// The text content of the response
    pub content: String,
    /// Any tool calls requested by the model
    pub tool_calls: Vec<ToolCall>,
    /// The reason generation stopped (e.g., "stop", "tool_calls", "length")
    pub finish_reason: String,
    pub usage: Option<TokenUsage>,
}

/// Provider enum for runtime selection
///
/// # Supported Providers
///
/// | Provider | Default base | API key | Notes |
/// |----------|--------------|---------|-------|
/// | XAI | `https://api.x.ai/v1` | `XAI_API_KEY` | Stock deployment (`grok-3`) |
/// | OpenAI | `https://api.openai.com/v1` | configurable | Any compatible gateway |
/// | Ollama | `http://localhost:11434` | none | Uses the `/v1` compatibility API |
#[derive(Debug, Clone)]
pub enum Provider {
    /// xAI Grok models
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::XAI {
    ///     api_key: std::env::var("XAI_API_KEY")?,
    ///     api_base: "https://api.x.ai/v1".to_string(),
    ///     model: "grok-3".to_string(),
    ///     temperature: None,
    ///     max_tokens: None,
    /// };
    /// ```
    XAI {
        api_key: String,
        api_base: String,
        model: String,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    },

    /// OpenAI API provider (including compatible APIs)
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    },

    /// Ollama local LLM provider
    ///
    /// `base_url` is the server root; requests go to `{base_url}/v1`.
    Ollama {
        base_url: String,
        model: String,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    },
}

impl Provider {
    /// Build a provider from a model and the provider config it references.
    ///
    /// The API key is read from the environment variable the provider names.
    ///
    /// # Errors
    ///
    /// `AppError::Configuration` when the key variable is unset or empty.
    pub fn from_model_config(model: &ModelConfig, provider: &ProviderConfig) -> Result<Self> {
        let temperature = Some(model.temperature);
        let max_tokens = Some(model.max_tokens);

        Ok(match provider {
            ProviderConfig::XAI {
                api_key_env,
                api_base,
                ..
            } => Provider::XAI {
                api_key: read_api_key(api_key_env)?,
                api_base: api_base.clone(),
                model: model.model.clone(),
                temperature,
                max_tokens,
            },
            ProviderConfig::OpenAI {
                api_key_env,
                api_base,
                ..
            } => Provider::OpenAI {
                api_key: read_api_key(api_key_env)?,
                api_base: api_base.clone(),
                model: model.model.clone(),
                temperature,
                max_tokens,
            },
            ProviderConfig::Ollama { base_url, .. } => Provider::Ollama {
                base_url: base_url.clone(),
                model: model.model.clone(),
                temperature,
                max_tokens,
            },
        })
    }

    /// Create a client instance for this provider
    pub fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        use super::openai::OpenAICompatibleClient;

        let client = match self {
            Provider::XAI {
                api_key,
                api_base,
                model,
                temperature,
                max_tokens,
            }
            | Provider::OpenAI {
                api_key,
                api_base,
                model,
                temperature,
                max_tokens,
            } => OpenAICompatibleClient::new(
                self.name(),
                api_base.clone(),
                Some(api_key.clone()),
                model.clone(),
            )?
            .with_sampling(*temperature, *max_tokens),
            Provider::Ollama {
                base_url,
                model,
                temperature,
                max_tokens,
            } => OpenAICompatibleClient::new(
                self.name(),
                format!("{}/v1", base_url.trim_end_matches('/')),
                None,
                model.clone(),
            )?
            .with_sampling(*temperature, *max_tokens),
        };

        Ok(Box::new(client))
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::XAI { .. } => "xAI",
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }

    /// Model identifier sent to the provider
    pub fn model(&self) -> &str {
        match self {
            Provider::XAI { model, .. }
            | Provider::OpenAI { model, .. }
            | Provider::Ollama { model, .. } => model,
        }
    }
}

fn read_api_key(env_name: &str) -> Result<String> {
    std::env::var(env_name)
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "Environment variable '{}' with the provider API key is not set",
                env_name
            ))
        })
}

/// Factory seam the agents obtain their LLM clients through.
///
/// Production code uses [`super::ConfigBasedLLMFactory`]; tests inject
/// scripted clients by implementing this trait.
#[async_trait]
pub trait LLMClientFactoryTrait: Send + Sync {
    /// Provider used when no model is named
    fn default_provider(&self) -> Result<Provider>;

    /// Create a client for the default model
    async fn create_default(&self) -> Result<Box<dyn LLMClient>>;

    /// Create a client for a model configured under `[models.<name>]`
    async fn create_for_model(&self, model_name: &str) -> Result<Box<dyn LLMClient>>;
}

/// Fixed-provider client factory
///
/// # Example
///
/// ```rust,ignore
/// use edflex::llm::{LLMClientFactory, Provider};
///
/// let factory = LLMClientFactory::new(Provider::Ollama {
///     base_url: "http://localhost:11434".to_string(),
///     model: "llama3.2".to_string(),
///     temperature: None,
///     max_tokens: None,
/// });
/// let client = factory.create_default().await?;
/// ```
pub struct LLMClientFactory {
    default_provider: Provider,
}

impl LLMClientFactory {
    /// Create a new factory with the specified default provider
    pub fn new(default_provider: Provider) -> Self {
        Self { default_provider }
    }
}

#[async_trait]
impl LLMClientFactoryTrait for LLMClientFactory {
    fn default_provider(&self) -> Result<Provider> {
        Ok(self.default_provider.clone())
    }

    async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        self.default_provider.create_client()
    }

    /// Every model name maps to the single configured provider.
    async fn create_for_model(&self, _model_name: &str) -> Result<Box<dyn LLMClient>> {
        self.default_provider.create_client()
    }
}
