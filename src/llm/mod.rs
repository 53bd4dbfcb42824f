//! LLM Provider Clients and Abstractions
//!
//! This module provides a unified interface over the hosted models the agents
//! run on. Every provider speaks the OpenAI chat-completions protocol, so one
//! reqwest client covers xAI, OpenAI and Ollama.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all clients implement
//! - [`LLMClientFactoryTrait`] - Seam the agents obtain clients through
//! - [`ProviderRegistry`] - Resolves `[models]` to `[providers]`
//! - [`ConfigBasedLLMFactory`] - Creates clients from the live `edflex.toml`
//! - [`coordinator::ToolCoordinator`] - Multi-turn tool calling loop
//!
//! # Example
//!
//! ```ignore
//! use edflex::llm::{ConfigBasedLLMFactory, LLMClientFactoryTrait};
//!
//! let factory = ConfigBasedLLMFactory::new(config_manager);
//! let client = factory.create_for_model("default").await?;
//! let answer = client.generate("What is 2+2?").await?;
//! ```

/// Core LLM client trait, providers and factories.
pub mod client;
/// Provider-agnostic multi-turn tool calling.
pub mod coordinator;
/// OpenAI-compatible chat-completions client.
pub mod openai;
/// Registry for named providers and models.
pub mod provider_registry;

pub use client::{
    LLMClient, LLMClientFactory, LLMClientFactoryTrait, LLMResponse, Provider, TokenUsage,
};
pub use coordinator::{ConversationMessage, MessageRole, ToolCallingConfig, ToolCoordinator};
pub use provider_registry::{ConfigBasedLLMFactory, ProviderRegistry};
