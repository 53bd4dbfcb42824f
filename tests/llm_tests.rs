//! HTTP-level tests for the chat-completions client and Exa search
//!
//! wiremock stands in for the provider and Exa APIs.

use edflex::llm::coordinator::ConversationMessage;
use edflex::llm::openai::OpenAICompatibleClient;
use edflex::llm::{ConfigBasedLLMFactory, LLMClient, LLMClientFactoryTrait, TokenUsage};
use edflex::tools::registry::Tool;
use edflex::tools::search::ExaSearchTool;
use edflex::types::{AppError, ToolDefinition};
use edflex::utils::toml_config::{ConfigManager, EdflexConfig, ModelConfig, ProviderConfig};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= Helper Functions =============

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19}
    })
}

fn client_for(server: &MockServer, api_key: Option<&str>) -> OpenAICompatibleClient {
    OpenAICompatibleClient::new(
        "xai",
        format!("{}/v1", server.uri()),
        api_key.map(str::to_string),
        "grok-3".to_string(),
    )
    .unwrap()
}

// ============= Chat Completions =============

#[tokio::test]
async fn test_generate_sends_model_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "grok-3"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Bonjour !")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("test-key"));
    let answer = client.generate("Salut").await.unwrap();

    assert_eq!(answer, "Bonjour !");
}

#[tokio::test]
async fn test_tool_calls_are_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"tool_choice": "auto"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "get_user_progress",
                            "arguments": "{\"user_id\": \"User123\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 30, "completion_tokens": 10}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let tools = vec![ToolDefinition {
        name: "get_user_progress".to_string(),
        description: "Progress of a learner".to_string(),
        parameters: json!({"type": "object", "properties": {"user_id": {"type": "string"}}}),
    }];

    let response = client
        .generate_with_tools_and_history(&[ConversationMessage::user("How am I doing?")], &tools)
        .await
        .unwrap();

    assert_eq!(response.content, "");
    assert_eq!(response.finish_reason, "tool_calls");
    assert_eq!(response.usage, Some(TokenUsage::new(30, 10)));
    assert_eq!(response.tool_calls.len(), 1);
    assert_eq!(response.tool_calls[0].id, "call_abc");
    assert_eq!(response.tool_calls[0].name, "get_user_progress");
    assert_eq!(response.tool_calls[0].arguments, json!({"user_id": "User123"}));
}

#[tokio::test]
async fn test_api_error_is_llm_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("wrong"));
    let err = client.generate("Salut").await.unwrap_err();

    match err {
        AppError::LLM(message) => {
            assert!(message.contains("401"));
            assert!(message.contains("invalid api key"));
        }
        other => panic!("expected LLM error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices_is_llm_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    assert!(matches!(
        client.generate("Salut").await,
        Err(AppError::LLM(_))
    ));
}

#[tokio::test]
async fn test_factory_resolves_configured_ollama_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"model": "llama3.2:3b", "max_tokens": 256})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("local answer")))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = EdflexConfig::default();
    config.providers = HashMap::from([(
        "local".to_string(),
        ProviderConfig::Ollama {
            base_url: server.uri(),
            default_model: "llama3.2:3b".to_string(),
        },
    )]);
    config.models = HashMap::from([(
        "default".to_string(),
        ModelConfig {
            provider: "local".to_string(),
            model: "llama3.2:3b".to_string(),
            temperature: 0.2,
            max_tokens: 256,
        },
    )]);

    let factory = ConfigBasedLLMFactory::new(Arc::new(ConfigManager::from_config(config)));
    let client = factory.create_for_model("default").await.unwrap();

    assert_eq!(client.model_name(), "llama3.2:3b");
    assert_eq!(client.generate("Hi").await.unwrap(), "local answer");
}

#[tokio::test]
async fn test_factory_rejects_unknown_model() {
    let factory =
        ConfigBasedLLMFactory::new(Arc::new(ConfigManager::from_config(EdflexConfig::default())));

    assert!(factory.create_for_model("does-not-exist").await.is_err());
}

// ============= Exa Search =============

#[tokio::test]
async fn test_exa_search_results_are_truncated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "exa-key"))
        .and(body_partial_json(json!({"query": "growth mindset", "numResults": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "title": "Growth mindset at work",
                    "url": "https://example.com/a",
                    "publishedDate": "2024-03-01",
                    "author": "A. Author",
                    "text": "abcdefghijklmnopqrstuvwxyz"
                },
                {
                    "title": "Learning habits",
                    "url": "https://example.com/b",
                    "text": "short"
                }
            ]
        })))
        .mount(&server)
        .await;

    let tool = ExaSearchTool::new("exa-key".to_string(), 10).with_base_url(server.uri());
    let result = tool
        .execute(json!({"query": "growth mindset", "num_results": 2}))
        .await
        .unwrap();

    assert_eq!(result["count"], 2);
    assert_eq!(result["results"][0]["title"], "Growth mindset at work");
    assert_eq!(result["results"][0]["text"], "abcdefghij");
    assert_eq!(result["results"][1]["text"], "short");
    assert!(result["results"][1]["author"].is_null());
}

#[tokio::test]
async fn test_exa_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let tool = ExaSearchTool::new("exa-key".to_string(), 500).with_base_url(server.uri());
    let err = tool
        .execute(json!({"query": "anything"}))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("429"));
}
