//! Learner Profiler tools: interaction tracking, behavior history, learning
//! style, skill gaps, engagement and the consolidated learner profile.

use crate::store::{LearningStore, NewInteraction};
use crate::tools::registry::Tool;
use crate::tools::{args_schema, parse_args, require, to_json};
use crate::types::learner::InteractionType;
use crate::types::{AppError, Result, utc_timestamp};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// All profiler tools over one store.
pub fn tools(store: &Arc<dyn LearningStore>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(TrackContentInteraction::new(store.clone())),
        Arc::new(LearnerBehaviorHistory::new(store.clone())),
        Arc::new(LearningStyleScore::new(store.clone())),
        Arc::new(SkillGaps::new(store.clone())),
        Arc::new(EngagementMetricsTool::new(store.clone())),
        Arc::new(LearnerProfileFromDb::new(store.clone())),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UserArgs {
    /// Learner identifier
    user_id: String,
}

// ============= track_content_interaction =============

#[derive(Debug, Deserialize, JsonSchema)]
struct TrackArgs {
    user_id: String,
    content_id: String,
    interaction_type: InteractionType,
    /// Time spent on the content, in seconds
    #[serde(default)]
    duration_seconds: u64,
    /// Share of the content consumed, 0.0 to 1.0
    #[serde(default)]
    completion_percentage: f64,
    /// ISO 8601 time of the interaction; defaults to now
    #[serde(default)]
    timestamp: Option<String>,
}

store_tool!(TrackContentInteraction);

#[async_trait]
impl Tool for TrackContentInteraction {
    fn name(&self) -> &str {
        "track_content_interaction"
    }

    fn description(&self) -> &str {
        "Record a learner's interaction with a piece of content (view, complete, bookmark, rate, search, abandon)"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<TrackArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: TrackArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        require(self.name(), "content_id", &args.content_id)?;
        if !(0.0..=1.0).contains(&args.completion_percentage) {
            return Err(AppError::InvalidInput(format!(
                "{}: completion_percentage must be between 0.0 and 1.0",
                self.name()
            )));
        }

        let tracked = self
            .store
            .record_interaction(NewInteraction {
                user_id: args.user_id,
                content_id: args.content_id,
                interaction_type: args.interaction_type,
                duration_seconds: args.duration_seconds,
                completion_percentage: args.completion_percentage,
                timestamp: args.timestamp.unwrap_or_else(utc_timestamp),
            })
            .await?;
        to_json(&tracked)
    }
}

// ============= get_learner_behavior_history =============

fn default_days_back() -> u32 {
    30
}

#[derive(Debug, Deserialize, JsonSchema)]
struct HistoryArgs {
    user_id: String,
    /// How many days of history to return (default 30)
    #[serde(default = "default_days_back")]
    days_back: u32,
}

store_tool!(LearnerBehaviorHistory);

#[async_trait]
impl Tool for LearnerBehaviorHistory {
    fn name(&self) -> &str {
        "get_learner_behavior_history"
    }

    fn description(&self) -> &str {
        "Get a learner's recent content interactions, most recent first"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<HistoryArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: HistoryArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        let history = self
            .store
            .behavior_history(&args.user_id, args.days_back)
            .await?;
        to_json(&history)
    }
}

// ============= calculate_learning_style_score =============

store_tool!(LearningStyleScore);

#[async_trait]
impl Tool for LearningStyleScore {
    fn name(&self) -> &str {
        "calculate_learning_style_score"
    }

    fn description(&self) -> &str {
        "Score a learner's visual, auditory, reading/writing and kinesthetic preferences (0-100) and name the dominant style"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<UserArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: UserArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        to_json(&self.store.learning_style(&args.user_id).await?)
    }
}

// ============= identify_skill_gaps =============

#[derive(Debug, Deserialize, JsonSchema)]
struct SkillGapArgs {
    user_id: String,
    /// The learner's current or target job role
    job_role: String,
}

store_tool!(SkillGaps);

#[async_trait]
impl Tool for SkillGaps {
    fn name(&self) -> &str {
        "identify_skill_gaps"
    }

    fn description(&self) -> &str {
        "Compare a learner's skills with the requirements of a job role and list the gaps by priority"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<SkillGapArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: SkillGapArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        to_json(&self.store.skill_gaps(&args.user_id, &args.job_role).await?)
    }
}

// ============= get_engagement_metrics =============

fn default_period_days() -> u32 {
    7
}

/// Longest measurement window accepted, about ten years.
pub const MAX_PERIOD_DAYS: u32 = 3650;

#[derive(Debug, Deserialize, JsonSchema)]
struct EngagementArgs {
    user_id: String,
    /// Length of the measurement window in days (default 7, at most 3650)
    #[serde(default = "default_period_days")]
    period_days: u32,
}

store_tool!(EngagementMetricsTool);

#[async_trait]
impl Tool for EngagementMetricsTool {
    fn name(&self) -> &str {
        "get_engagement_metrics"
    }

    fn description(&self) -> &str {
        "Get session frequency, completion rate, streaks, churn risk and engagement tier over a period"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<EngagementArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: EngagementArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        if !(1..=MAX_PERIOD_DAYS).contains(&args.period_days) {
            return Err(AppError::InvalidInput(format!(
                "{}: period_days must be between 1 and {}",
                self.name(),
                MAX_PERIOD_DAYS
            )));
        }
        to_json(
            &self
                .store
                .engagement_metrics(&args.user_id, args.period_days)
                .await?,
        )
    }
}

// ============= get_learner_profile_from_db =============

store_tool!(LearnerProfileFromDb);

#[async_trait]
impl Tool for LearnerProfileFromDb {
    fn name(&self) -> &str {
        "get_learner_profile_from_db"
    }

    fn description(&self) -> &str {
        "Load the complete stored learner profile: learning style, preferences, behavior, skills, engagement"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<UserArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: UserArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        to_json(&self.store.full_profile(&args.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SampleLearningStore;
    use rstest::rstest;
    use serde_json::json;

    fn store() -> Arc<dyn LearningStore> {
        Arc::new(SampleLearningStore::new())
    }

    #[tokio::test]
    async fn test_track_interaction_message() {
        let tool = TrackContentInteraction::new(store());
        let result = tool
            .execute(json!({
                "user_id": "User123",
                "content_id": "V456",
                "interaction_type": "complete",
                "duration_seconds": 720,
                "completion_percentage": 1.0,
                "timestamp": "2025-10-05T18:20:00Z"
            }))
            .await
            .unwrap();

        assert_eq!(result["status"], "success");
        assert_eq!(
            result["message"],
            "Tracked complete interaction for user User123 on content V456"
        );
        assert!(result["interaction_id"].as_str().unwrap().starts_with("int_"));
    }

    #[tokio::test]
    async fn test_track_interaction_rejects_bad_completion() {
        let tool = TrackContentInteraction::new(store());
        let err = tool
            .execute(json!({
                "user_id": "u1",
                "content_id": "V456",
                "interaction_type": "view",
                "completion_percentage": 75
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg.contains("completion_percentage")));
    }

    #[tokio::test]
    async fn test_track_interaction_rejects_unknown_type() {
        let tool = TrackContentInteraction::new(store());
        let err = tool
            .execute(json!({"user_id": "u1", "content_id": "V1", "interaction_type": "skim"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_learning_style_score() {
        let result = LearningStyleScore::new(store())
            .execute(json!({"user_id": "u1"}))
            .await
            .unwrap();
        assert_eq!(result["dominant_style"], "visual");
        assert_eq!(result["learning_styles"]["visual"], 85);
        assert_eq!(result["based_on_interactions"], 247);
    }

    #[tokio::test]
    async fn test_skill_gaps_are_priority_ordered() {
        let result = SkillGaps::new(store())
            .execute(json!({"user_id": "u1", "job_role": "Marketing Manager"}))
            .await
            .unwrap();
        let gaps = result.as_array().unwrap();
        assert_eq!(gaps.len(), 3);
        assert_eq!(gaps[0]["skill"], "Data Analytics");
        assert_eq!(gaps[0]["priority"], "high");
    }

    #[tokio::test]
    async fn test_engagement_defaults_to_a_week() {
        let result = EngagementMetricsTool::new(store())
            .execute(json!({"user_id": "u1"}))
            .await
            .unwrap();
        assert_eq!(result["period_days"], 7);
        assert_eq!(result["engagement_tier"], "engaged");
        assert_eq!(result["threshold_tier"], "casual");
    }

    #[rstest]
    #[case(0)]
    #[case(3651)]
    #[case(u32::MAX)]
    #[tokio::test]
    async fn test_engagement_period_out_of_range(#[case] period_days: u32) {
        let err = EngagementMetricsTool::new(store())
            .execute(json!({"user_id": "u1", "period_days": period_days}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg.contains("between 1 and 3650")));
    }

    #[tokio::test]
    async fn test_engagement_longest_period() {
        let result = EngagementMetricsTool::new(store())
            .execute(json!({"user_id": "u1", "period_days": MAX_PERIOD_DAYS}))
            .await
            .unwrap();
        assert_eq!(result["period_days"], 3650);
    }

    #[tokio::test]
    async fn test_full_profile_and_history() {
        let profile = LearnerProfileFromDb::new(store())
            .execute(json!({"user_id": "u9"}))
            .await
            .unwrap();
        assert_eq!(profile["user_id"], "u9");
        assert_eq!(profile["metadata"]["total_interactions"], 247);

        let history = LearnerBehaviorHistory::new(store())
            .execute(json!({"user_id": "u9"}))
            .await
            .unwrap();
        assert_eq!(history.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_tools_have_unique_names() {
        let names: Vec<String> = tools(&store()).iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"get_learner_profile_from_db".to_string()));
    }
}
