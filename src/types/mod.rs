use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Records exchanged by the assistant tools.
pub mod assistant;
/// Catalog, recommendation and learning path records.
pub mod catalog;
/// Learner behavior, style, skill and engagement records.
pub mod learner;

// ============= API Request/Response Types =============

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ProfilerRequest {
    /// Learner id. Any non-empty string or non-zero number is accepted.
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    /// One of `analyze_behavior`, `identify_learning_style`, `detect_skill_gaps`,
    /// `calculate_engagement`, `get_full_profile`. Defaults to `analyze_behavior`.
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct RecommenderRequest {
    /// Learner id. Any non-empty string or non-zero number is accepted.
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    /// One of `recommend_content`, `build_learning_path`, `get_next_content`,
    /// `check_prerequisites`. Defaults to `recommend_content`.
    #[serde(default)]
    pub action: Option<String>,
    /// Learning goal, only used by `build_learning_path`.
    #[serde(default)]
    pub goal: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct AssistantRequest {
    /// Learner id. Any non-empty string or non-zero number is accepted.
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub question: Option<String>,
    /// Continue an earlier exchange. Omit for a one-shot question.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Envelope returned by the profiler and recommender endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    /// The `user_id` exactly as it was sent
    pub user_id: serde_json::Value,
    pub action: String,
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssistantResponse {
    pub success: bool,
    /// The `user_id` exactly as it was sent
    pub user_id: serde_json::Value,
    pub question: String,
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub agents: std::collections::BTreeMap<String, String>,
}

// ============= Agent Types =============

/// The three agents served by this crate.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    LearnerProfiler,
    PathRecommender,
    LearningAssistant,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [
        AgentKind::LearnerProfiler,
        AgentKind::PathRecommender,
        AgentKind::LearningAssistant,
    ];

    /// Key used in `edflex.toml` (`[agents.<key>]`) and in the health report.
    pub fn key(&self) -> &'static str {
        match self {
            AgentKind::LearnerProfiler => "learner_profiler",
            AgentKind::PathRecommender => "path_recommender",
            AgentKind::LearningAssistant => "learning_assistant",
        }
    }

    pub fn agent_id(&self) -> &'static str {
        match self {
            AgentKind::LearnerProfiler => "learner_profiler_001",
            AgentKind::PathRecommender => "path_recommender_001",
            AgentKind::LearningAssistant => "learning_assistant_001",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentKind::LearnerProfiler => "Learner Profiler",
            AgentKind::PathRecommender => "Path Recommender",
            AgentKind::LearningAssistant => "Learning Assistant",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ============= Tool Types =============

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_message(self) -> (axum::http::StatusCode, String) {
        use axum::http::StatusCode;
        match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::LLM(msg) | AppError::Configuration(msg) | AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        }

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::LLM(format!("HTTP request failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Current UTC time in the `2025-10-06T14:30:01.123456Z` form used by every record.
pub fn utc_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_agent_kind_keys_round_trip() {
        for kind in AgentKind::ALL {
            assert_eq!(AgentKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(AgentKind::from_key("router"), None);
    }

    #[test]
    fn test_agent_kind_serializes_as_key() {
        let json = serde_json::to_string(&AgentKind::PathRecommender).unwrap();
        assert_eq!(json, "\"path_recommender\"");
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (AppError::InvalidInput("x".into()), 400),
            (AppError::NotFound("x".into()), 404),
            (AppError::LLM("x".into()), 500),
            (AppError::Configuration("x".into()), 500),
            (AppError::Internal("x".into()), 500),
        ];
        for (err, code) in cases {
            assert_eq!(err.into_response().status().as_u16(), code);
        }
    }

    #[test]
    fn test_assistant_response_omits_missing_conversation() {
        let response = AssistantResponse {
            success: true,
            user_id: "u1".into(),
            question: "q".into(),
            result: "r".into(),
            conversation_id: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("conversation_id").is_none());
    }

    #[test]
    fn test_utc_timestamp_format() {
        let ts = utc_timestamp();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
