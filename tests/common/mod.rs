//! Shared helpers for the integration tests.
#![allow(dead_code)]

pub mod mocks;

use edflex::utils::toml_config::{ConfigManager, EdflexConfig};
use edflex::{AppState, SampleLearningStore};
use mocks::{MockLLMClient, MockLLMFactory};
use std::sync::Arc;

/// App state on the stock configuration, backed by `client` and the sample store.
pub fn test_state(client: MockLLMClient) -> (AppState, Arc<MockLLMFactory>) {
    state_with_config(EdflexConfig::default(), client)
}

pub fn state_with_config(
    config: EdflexConfig,
    client: MockLLMClient,
) -> (AppState, Arc<MockLLMFactory>) {
    let factory = Arc::new(MockLLMFactory::new(client));
    let state = AppState::with_store(
        Arc::new(ConfigManager::from_config(config)),
        factory.clone(),
        Arc::new(SampleLearningStore::new()),
    );
    (state, factory)
}
