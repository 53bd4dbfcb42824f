use crate::AppState;
use crate::agents::prompts::{DEFAULT_PROFILER_ACTION, profiler_prompt};
use crate::api::handlers::{json_body, required_user_id, run_agent};
use crate::types::{ActionResponse, AgentKind, ProfilerRequest, Result};
use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State};

/// Run the Learner Profiler for a learner
#[utoipa::path(
    post,
    path = "/api/profiler",
    request_body = ProfilerRequest,
    responses(
        (status = 200, description = "Profiler analysis", body = ActionResponse),
        (status = 400, description = "Missing user_id or malformed body"),
        (status = 500, description = "Agent or LLM failure")
    ),
    tag = "agents"
)]
pub async fn profile_learner(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProfilerRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>> {
    let request = json_body(payload)?;
    let (user_id, raw_user_id) = required_user_id(request.user_id)?;
    let action = request
        .action
        .unwrap_or_else(|| DEFAULT_PROFILER_ACTION.to_string());

    let prompt = profiler_prompt(&action, &user_id);
    let result = run_agent(&state, AgentKind::LearnerProfiler, &prompt, &[]).await?;

    Ok(Json(ActionResponse {
        success: true,
        user_id: raw_user_id,
        action,
        result,
    }))
}
