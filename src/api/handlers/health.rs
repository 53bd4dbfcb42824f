use crate::AppState;
use crate::types::{AgentKind, HealthResponse};
use axum::{Json, extract::State};
use std::collections::BTreeMap;

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let agents: BTreeMap<String, String> = AgentKind::ALL
        .into_iter()
        .filter(|kind| state.agent_registry.has_agent(kind.key()))
        .map(|kind| (kind.key().to_string(), "active".to_string()))
        .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        agents,
    })
}
