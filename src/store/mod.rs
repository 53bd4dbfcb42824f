//! Learning data access
//!
//! This module provides the `LearningStore` trait that the agent tools read
//! learner, catalog and support data through. Tools never build records
//! themselves; they validate arguments and delegate here.
//!
//! [`SampleLearningStore`] answers every query with a fixed, realistic data
//! set so the agents can be exercised end to end without a database.
//!
//! # Example
//!
//! ```rust,ignore
//! use edflex::store::{LearningStore, SampleLearningStore};
//!
//! let store = SampleLearningStore::new();
//! let gaps = store.skill_gaps("User123", "Marketing Manager").await?;
//! assert_eq!(gaps[0].skill, "Data Analytics");
//! ```

/// Fixed sample data implementation.
pub mod sample;

pub use sample::SampleLearningStore;

use crate::types::Result;
use crate::types::assistant::{
    Acknowledgement, ContentSummary, KnowledgeArticle, LearnerContext, NotificationType,
    Satisfaction, SimilarContent, TroubleshootingAnswer, UserProgress,
};
use crate::types::catalog::{
    CatalogItem, CatalogQuery, ContentMetadata, LearningPath, LoggedRecommendation, NextContent,
    PrerequisiteCheck,
};
use crate::types::learner::{
    BehaviorEvent, EngagementMetrics, InteractionType, LearnerProfile, LearningStyleReport,
    RecommenderProfile, SkillGap, TrackedInteraction,
};
use async_trait::async_trait;

/// A content interaction to persist.
#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub user_id: String,
    pub content_id: String,
    pub interaction_type: InteractionType,
    pub duration_seconds: u64,
    pub completion_percentage: f64,
    pub timestamp: String,
}

/// A recommendation shown to a learner.
#[derive(Debug, Clone)]
pub struct NewRecommendation {
    pub user_id: String,
    pub content_id: String,
    pub recommendation_reason: String,
    pub context: serde_json::Value,
}

/// One question/answer exchange with the assistant.
#[derive(Debug, Clone)]
pub struct NewChatInteraction {
    pub user_id: String,
    pub question: String,
    pub response: String,
    pub satisfaction_inferred: Satisfaction,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: String,
    pub message: String,
    pub notification_type: NotificationType,
}

/// Read and write access to learner, catalog and support data.
#[async_trait]
pub trait LearningStore: Send + Sync {
    // ---- learner profiling ----

    async fn record_interaction(&self, interaction: NewInteraction) -> Result<TrackedInteraction>;

    /// Interactions from the last `days_back` days, most recent first.
    async fn behavior_history(&self, user_id: &str, days_back: u32) -> Result<Vec<BehaviorEvent>>;

    async fn learning_style(&self, user_id: &str) -> Result<LearningStyleReport>;

    /// Skill gaps for the learner's role, highest priority first.
    async fn skill_gaps(&self, user_id: &str, job_role: &str) -> Result<Vec<SkillGap>>;

    async fn engagement_metrics(&self, user_id: &str, period_days: u32)
    -> Result<EngagementMetrics>;

    async fn full_profile(&self, user_id: &str) -> Result<LearnerProfile>;

    // ---- recommendation ----

    async fn recommender_profile(&self, user_id: &str) -> Result<RecommenderProfile>;

    async fn search_catalog(&self, query: &CatalogQuery) -> Result<Vec<CatalogItem>>;

    async fn learning_path(
        &self,
        skill_target: &str,
        user_id: &str,
        max_content_items: usize,
    ) -> Result<LearningPath>;

    async fn next_best_content(&self, user_id: &str, count: usize) -> Result<Vec<NextContent>>;

    async fn record_recommendation(
        &self,
        recommendation: NewRecommendation,
    ) -> Result<LoggedRecommendation>;

    async fn prerequisite_check(&self, user_id: &str, content_id: &str)
    -> Result<PrerequisiteCheck>;

    async fn content_metadata(&self, content_id: &str) -> Result<ContentMetadata>;

    // ---- learning assistant ----

    async fn knowledge_base(
        &self,
        question: &str,
        context: Option<&str>,
    ) -> Result<Vec<KnowledgeArticle>>;

    async fn content_summary(&self, content_id: &str) -> Result<ContentSummary>;

    async fn similar_content(&self, content_id: &str, count: usize) -> Result<Vec<SimilarContent>>;

    async fn record_chat_interaction(&self, chat: NewChatInteraction) -> Result<Acknowledgement>;

    async fn user_progress(&self, user_id: &str) -> Result<UserProgress>;

    async fn send_notification(&self, notification: NewNotification) -> Result<Acknowledgement>;

    async fn troubleshooting(&self, issue_description: &str) -> Result<TroubleshootingAnswer>;

    async fn learner_context(&self, user_id: &str) -> Result<LearnerContext>;
}
