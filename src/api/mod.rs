//! HTTP API handlers and routes
//!
//! # API Endpoints
//!
//! ## Agents
//! - `POST /api/profiler` - Run a Learner Profiler action for a learner
//! - `POST /api/recommender` - Run a Path Recommender action for a learner
//! - `POST /api/assistant` - Ask the Learning Assistant a question
//! - `GET /api/agents` - List agents with their model and tools
//!
//! ## Conversations
//! - `GET /api/assistant/conversations/{id}?user_id=` - Stored turns of a conversation
//! - `DELETE /api/assistant/conversations/{id}?user_id=` - Delete a conversation
//!
//! ## Health
//! - `GET /health` - Health check
//!
//! Errors are returned as `{"error": "..."}` with a 400, 404 or 500 status.
//!
//! # OpenAPI Documentation
//!
//! The OpenAPI document is served at `/api-docs/openapi.json`. With the
//! `swagger-ui` feature, interactive documentation is at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use crate::agents::AgentSummary;
use crate::api::handlers::assistant::ClearedConversation;
use crate::memory::{Conversation, Turn};
use crate::types::{
    ActionResponse, AssistantRequest, AssistantResponse, HealthResponse, ProfilerRequest,
    RecommenderRequest,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Edflex Learning Agents API",
        description = "Learner profiling, learning path recommendation and a learning assistant"
    ),
    paths(
        handlers::profiler::profile_learner,
        handlers::recommender::recommend,
        handlers::assistant::ask,
        handlers::assistant::get_conversation,
        handlers::assistant::clear_conversation,
        handlers::agents::list_agents,
        handlers::health::health_check,
    ),
    components(schemas(
        ProfilerRequest,
        RecommenderRequest,
        AssistantRequest,
        ActionResponse,
        AssistantResponse,
        HealthResponse,
        AgentSummary,
        Conversation,
        Turn,
        ClearedConversation,
    )),
    tags(
        (name = "agents", description = "Agent endpoints"),
        (name = "conversations", description = "Learning Assistant conversation memory"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
