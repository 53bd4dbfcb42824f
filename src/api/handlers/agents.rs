use crate::AppState;
use crate::agents::AgentSummary;
use axum::{Json, extract::State};

/// List the agents with their model and allowed tools
#[utoipa::path(
    get,
    path = "/api/agents",
    responses((status = 200, description = "Agent summaries", body = Vec<AgentSummary>)),
    tag = "agents"
)]
pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<AgentSummary>> {
    Json(state.agent_registry.summaries())
}
