use crate::types::learner::{ContentFormat, Difficulty};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    pub article_id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub relevance_score: f64,
    pub source: String,
    pub related_content: Vec<String>,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSummary {
    pub content_id: String,
    pub title: String,
    pub summary: String,
    pub key_concepts: Vec<String>,
    pub learning_objectives: Vec<String>,
    pub format: ContentFormat,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
    pub language: String,
    pub prerequisites: Vec<String>,
    pub who_should_take: String,
    pub what_youll_learn: String,
    pub instructor: String,
    pub publisher: String,
    pub average_rating: f64,
    pub completion_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarContent {
    pub content_id: String,
    pub title: String,
    pub format: ContentFormat,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
    pub similarity_score: f64,
    pub similarity_reason: String,
    pub why_similar: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Satisfaction {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatLogEntry {
    pub interaction_id: String,
    pub user_id: String,
    pub question: String,
    pub response: String,
    pub satisfaction_inferred: Satisfaction,
    pub timestamp: String,
    pub interaction_type: String,
    pub response_length: usize,
    pub question_length: usize,
}

/// Acknowledgement returned by the write-side assistant tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: String,
    pub last_updated: String,
    pub active_learning_paths: Vec<ActivePath>,
    pub recent_completions: Vec<Completion>,
    pub achievements: Vec<Achievement>,
    pub certifications_in_progress: Vec<CertificationProgress>,
    pub current_streak_days: u32,
    pub longest_streak_days: u32,
    pub total_content_completed: u32,
    pub total_hours_learning: f64,
    pub member_since: String,
    pub upcoming_milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivePath {
    pub path_id: String,
    pub path_name: String,
    pub skill_target: String,
    pub progress_percent: u8,
    pub items_completed: u32,
    pub items_total: u32,
    pub started_at: String,
    pub estimated_completion: String,
    pub next_item: ContentRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRef {
    pub content_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    pub content_id: String,
    pub title: String,
    pub completed_at: String,
    pub quiz_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub achievement_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub earned_at: String,
    pub badge_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationProgress {
    pub certification_id: String,
    pub name: String,
    pub progress_percent: u8,
    pub items_completed: u32,
    pub items_total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub milestone: String,
    pub progress_percent: u8,
    pub items_remaining: u32,
    pub estimated_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Milestone,
    Reminder,
    Challenge,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NotificationType::Milestone => "milestone",
            NotificationType::Reminder => "reminder",
            NotificationType::Challenge => "challenge",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: String,
    pub user_id: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub sent_at: String,
    pub channels: Vec<String>,
    pub priority: String,
}

/// Answer from the troubleshooting FAQ. Unmatched issues carry escalation details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TroubleshootingAnswer {
    pub issue: String,
    pub solution_found: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub solution_steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_resolution_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalate_if_unresolved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalate_to_support: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerContext {
    pub user_id: String,
    pub name: String,
    pub job_role: String,
    pub current_learning_path: String,
    pub current_path_progress: u8,
    pub recent_activity: String,
    pub last_active: String,
    pub preferences: ContextPreferences,
    pub engagement_level: String,
    pub typical_session_time: String,
    pub learning_pace: String,
    pub courses_completed_this_month: u32,
    pub current_streak_days: u32,
    pub member_since: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPreferences {
    pub format: ContentFormat,
    pub language: String,
    pub difficulty: Difficulty,
}
