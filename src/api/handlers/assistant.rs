use crate::AppState;
use crate::agents::prompts::assistant_prompt;
use crate::api::handlers::{json_body, required, required_user_id, run_agent};
use crate::memory::Conversation;
use crate::types::{AgentKind, AssistantRequest, AssistantResponse, Result};
use axum::extract::rejection::JsonRejection;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Ask the Learning Assistant a question
///
/// With a `conversation_id`, recent turns of that conversation are replayed
/// to the assistant and the new exchange is stored.
#[utoipa::path(
    post,
    path = "/api/assistant",
    request_body = AssistantRequest,
    responses(
        (status = 200, description = "Assistant answer", body = AssistantResponse),
        (status = 400, description = "Missing user_id or question, or malformed body"),
        (status = 404, description = "Conversation belongs to another user"),
        (status = 500, description = "Agent or LLM failure")
    ),
    tag = "agents"
)]
pub async fn ask(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AssistantRequest>, JsonRejection>,
) -> Result<Json<AssistantResponse>> {
    let request = json_body(payload)?;
    let (user_id, raw_user_id) = required_user_id(request.user_id)?;
    let question = required(request.question, "question")?;
    let conversation_id = request.conversation_id.filter(|id| !id.is_empty());

    let history = match &conversation_id {
        Some(id) => state.conversations.history(id, &user_id)?,
        None => Vec::new(),
    };

    let prompt = assistant_prompt(&user_id, &question);
    let result = run_agent(&state, AgentKind::LearningAssistant, &prompt, &history).await?;

    if let Some(id) = &conversation_id {
        state
            .conversations
            .record_exchange(id, &user_id, &prompt, &result)?;
    }

    Ok(Json(AssistantResponse {
        success: true,
        user_id: raw_user_id,
        question,
        result,
        conversation_id,
    }))
}

/// Owner of the conversation being read or cleared.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConversationOwner {
    /// The `user_id` that started the conversation
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Get the stored turns of a conversation
#[utoipa::path(
    get,
    path = "/api/assistant/conversations/{id}",
    params(("id" = String, Path, description = "Conversation id"), ConversationOwner),
    responses(
        (status = 200, description = "Conversation turns", body = Conversation),
        (status = 400, description = "Missing user_id"),
        (status = 404, description = "Conversation not found for this user")
    ),
    tag = "conversations"
)]
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(owner): Query<ConversationOwner>,
) -> Result<Json<Conversation>> {
    let user_id = required(owner.user_id, "user_id")?;
    Ok(Json(state.conversations.get(&id, &user_id)?))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearedConversation {
    pub success: bool,
    pub conversation_id: String,
    /// Number of turns removed
    pub cleared: usize,
}

/// Delete a conversation
#[utoipa::path(
    delete,
    path = "/api/assistant/conversations/{id}",
    params(("id" = String, Path, description = "Conversation id"), ConversationOwner),
    responses(
        (status = 200, description = "Conversation removed", body = ClearedConversation),
        (status = 400, description = "Missing user_id"),
        (status = 404, description = "Conversation not found for this user")
    ),
    tag = "conversations"
)]
pub async fn clear_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(owner): Query<ConversationOwner>,
) -> Result<Json<ClearedConversation>> {
    let user_id = required(owner.user_id, "user_id")?;
    let cleared = state.conversations.clear(&id, &user_id)?;
    Ok(Json(ClearedConversation {
        success: true,
        conversation_id: id,
        cleared,
    }))
}
