//! # Edflex - personalised learning agents
//!
//! A server that hosts three LLM agents for a corporate learning platform,
//! each reachable through a JSON endpoint and each able to call tools over
//! learner, catalog and support data:
//!
//! | Agent | Endpoint | Purpose |
//! |-------|----------|---------|
//! | Learner Profiler | `POST /api/profiler` | Analyse behaviour and maintain learner profiles |
//! | Path Recommender | `POST /api/recommender` | Recommend content and build learning paths |
//! | Learning Assistant | `POST /api/assistant` | Answer learner questions in real time |
//!
//! ## Overview
//!
//! The crate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `edflex-server` binary
//! 2. **As a library** - Build an [`AppState`] and mount [`api::routes::create_app`]
//!
//! ### Library Example
//!
//! ```rust,ignore
//! use edflex::{AppState, ConfigManager, EdflexConfig};
//! use std::sync::Arc;
//!
//! let config_manager = Arc::new(ConfigManager::from_config(EdflexConfig::default()));
//! let state = AppState::new(config_manager);
//! let app = edflex::api::routes::create_app(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ### Running an Agent Directly
//!
//! ```rust,ignore
//! use edflex::agents::prompts::assistant_prompt;
//! use edflex::types::AgentKind;
//!
//! let agent = state.agent_registry.create_agent(AgentKind::LearningAssistant).await?;
//! let run = agent.run(&assistant_prompt("User123", "What is SEO?"), &[]).await?;
//! println!("{}", run.content);
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - Agent definitions, prompts and the agent registry
//! - [`api`] - REST API handlers and routes
//! - [`llm`] - LLM clients and the tool calling loop
//! - [`memory`] - Learning Assistant conversation memory
//! - [`store`] - Learner, catalog and support data
//! - [`tools`] - Tools the agents call
//! - [`types`] - Request, response and domain types, errors
//! - [`utils`] - TOML configuration with hot reload
//!
//! ## Configuration
//!
//! Everything is driven by `edflex.toml` (providers, models, tools, agents),
//! hot-reloaded on change. Without a file the stock deployment is used: xAI
//! `grok-3` for all three agents.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Learning agents: definitions, prompts and registry.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface for the server binary.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Conversation memory for the Learning Assistant.
pub mod memory;
/// Learner, catalog and support data access.
pub mod store;
/// Agent tools (learner, recommendation, assistant, reasoning, search).
pub mod tools;
/// Core types (requests, responses, domain records, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{AgentRegistry, AgentSummary, ConfigurableAgent};
pub use llm::client::LLMClientFactoryTrait;
pub use llm::{
    ConfigBasedLLMFactory, LLMClient, LLMClientFactory, LLMResponse, Provider, ProviderRegistry,
};
pub use memory::ConversationStore;
pub use store::{LearningStore, SampleLearningStore};
pub use tools::registry::ToolRegistry;
pub use types::{AgentKind, AppError, Result};
pub use utils::toml_config::{ConfigManager, EdflexConfig};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML configuration with hot-reload support
    pub config_manager: Arc<ConfigManager>,
    /// LLM client factory
    pub llm_factory: Arc<dyn LLMClientFactoryTrait>,
    /// Creates agents per request from the live configuration
    pub agent_registry: Arc<AgentRegistry>,
    /// Tools shared by all agents
    pub tool_registry: Arc<ToolRegistry>,
    /// Learning Assistant conversations
    pub conversations: Arc<ConversationStore>,
}

impl AppState {
    /// State backed by the configured providers and the sample data store.
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        let llm_factory: Arc<dyn LLMClientFactoryTrait> =
            Arc::new(ConfigBasedLLMFactory::new(config_manager.clone()));
        Self::with_store(config_manager, llm_factory, Arc::new(SampleLearningStore::new()))
    }

    /// State with an explicit LLM factory and data store.
    pub fn with_store(
        config_manager: Arc<ConfigManager>,
        llm_factory: Arc<dyn LLMClientFactoryTrait>,
        store: Arc<dyn LearningStore>,
    ) -> Self {
        let tool_registry = Arc::new(ToolRegistry::with_config_manager(
            config_manager.clone(),
            store,
        ));
        let agent_registry = Arc::new(AgentRegistry::new(
            config_manager.clone(),
            llm_factory.clone(),
            tool_registry.clone(),
        ));

        Self {
            config_manager,
            llm_factory,
            agent_registry,
            tool_registry,
            conversations: Arc::new(ConversationStore::default()),
        }
    }
}
