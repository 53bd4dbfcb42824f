use crate::AppState;
use crate::agents::prompts::{DEFAULT_RECOMMENDER_ACTION, recommender_prompt};
use crate::api::handlers::{json_body, required_user_id, run_agent};
use crate::types::{ActionResponse, AgentKind, RecommenderRequest, Result};
use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State};

/// Run the Path Recommender for a learner
#[utoipa::path(
    post,
    path = "/api/recommender",
    request_body = RecommenderRequest,
    responses(
        (status = 200, description = "Recommendations or learning path", body = ActionResponse),
        (status = 400, description = "Missing user_id or malformed body"),
        (status = 500, description = "Agent or LLM failure")
    ),
    tag = "agents"
)]
pub async fn recommend(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RecommenderRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>> {
    let request = json_body(payload)?;
    let (user_id, raw_user_id) = required_user_id(request.user_id)?;
    let action = request
        .action
        .unwrap_or_else(|| DEFAULT_RECOMMENDER_ACTION.to_string());

    let prompt = recommender_prompt(&action, &user_id, request.goal.as_deref());
    let result = run_agent(&state, AgentKind::PathRecommender, &prompt, &[]).await?;

    Ok(Json(ActionResponse {
        success: true,
        user_id: raw_user_id,
        action,
        result,
    }))
}
