use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of event recorded against a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    View,
    Complete,
    Bookmark,
    Rate,
    Search,
    Abandon,
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InteractionType::View => "view",
            InteractionType::Complete => "complete",
            InteractionType::Bookmark => "bookmark",
            InteractionType::Rate => "rate",
            InteractionType::Search => "search",
            InteractionType::Abandon => "abandon",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Video,
    Article,
    Podcast,
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Proficiency levels, ordered from no exposure to advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    None,
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Low / medium / high scale shared by churn risk and motivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningPace {
    Slow,
    Moderate,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyle {
    Visual,
    Auditory,
    ReadingWriting,
    Kinesthetic,
}

// ============= Interaction tracking =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub interaction_id: String,
    pub user_id: String,
    pub content_id: String,
    pub interaction_type: InteractionType,
    pub duration_seconds: u64,
    pub completion_percentage: f64,
    pub timestamp: String,
    pub stored_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedInteraction {
    pub status: String,
    pub interaction_id: String,
    pub stored_at: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorEvent {
    pub interaction_id: String,
    pub user_id: String,
    pub content_id: String,
    pub content_title: String,
    pub content_format: ContentFormat,
    pub content_difficulty: Difficulty,
    pub interaction_type: InteractionType,
    pub duration_seconds: u64,
    pub completion_percentage: f64,
    pub timestamp: String,
}

// ============= Learning style =============

/// Per-style preference scores on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningStyleScores {
    pub visual: u8,
    pub auditory: u8,
    pub reading_writing: u8,
    pub kinesthetic: u8,
}

impl LearningStyleScores {
    /// Highest-scoring style. Ties resolve in declaration order.
    pub fn dominant(&self) -> LearningStyle {
        let ranked = [
            (LearningStyle::Visual, self.visual),
            (LearningStyle::Auditory, self.auditory),
            (LearningStyle::ReadingWriting, self.reading_writing),
            (LearningStyle::Kinesthetic, self.kinesthetic),
        ];
        let mut best = ranked[0];
        for candidate in &ranked[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        best.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningStyleReport {
    pub user_id: String,
    pub learning_styles: LearningStyleScores,
    pub dominant_style: LearningStyle,
    pub confidence: f64,
    pub based_on_interactions: u32,
    pub calculated_at: String,
}

// ============= Skill gaps =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub priority: Priority,
    pub current_proficiency: Proficiency,
    pub required_proficiency: Proficiency,
    /// Levels behind the role requirement.
    pub gap_size: u8,
    pub reason: String,
    pub estimated_learning_hours: u32,
    pub trending_skill: bool,
    pub user_interest_score: f64,
}

// ============= Engagement =============

/// Engagement bands used to spot at-risk and highly engaged learners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngagementTier {
    AtRisk,
    Casual,
    Engaged,
    HighlyEngaged,
}

impl EngagementTier {
    /// Classify from weekly sessions and completion rate (percent).
    ///
    /// Highly engaged needs more than 7 sessions and above 85 % completion,
    /// engaged more than 4 and above 70 %. Fewer than 2 sessions together
    /// with under 50 % completion is at risk; everything else is casual.
    pub fn classify(sessions_per_week: f64, completion_rate_percent: f64) -> Self {
        if sessions_per_week > 7.0 && completion_rate_percent > 85.0 {
            EngagementTier::HighlyEngaged
        } else if sessions_per_week > 4.0 && completion_rate_percent > 70.0 {
            EngagementTier::Engaged
        } else if sessions_per_week < 2.0 && completion_rate_percent < 50.0 {
            EngagementTier::AtRisk
        } else {
            EngagementTier::Casual
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub user_id: String,
    pub period_days: u32,
    pub period_start: String,
    pub period_end: String,
    pub sessions_per_week: f64,
    pub avg_session_duration_minutes: u32,
    pub total_time_spent_minutes: u32,
    pub content_viewed: u32,
    pub content_completed: u32,
    pub completion_rate_percent: f64,
    pub content_diversity_score: u8,
    pub formats_used: Vec<ContentFormat>,
    pub topics_explored: Vec<String>,
    pub engagement_score: u8,
    pub engagement_trend: String,
    pub days_since_last_active: u32,
    pub longest_streak_days: u32,
    pub current_streak_days: u32,
    pub risk_of_churn: Level,
    pub churn_risk_factors: Vec<String>,
    /// Tier recorded for the learner
    pub engagement_tier: EngagementTier,
    /// Tier the profiler thresholds give for this period's sessions and
    /// completion rate. Differs from `engagement_tier` when the learner's
    /// recent activity has drifted from their recorded band.
    pub threshold_tier: EngagementTier,
}

// ============= Full learner profile =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub user_id: String,
    pub profile_updated_at: String,
    pub learning_style: LearningStyleSummary,
    pub content_preferences: ContentPreferences,
    pub behavioral_patterns: BehavioralPatterns,
    pub skill_profile: SkillProfile,
    pub engagement_metrics: ProfileEngagement,
    pub metadata: ProfileMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningStyleSummary {
    pub dominant_style: LearningStyle,
    pub scores: LearningStyleScores,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPreferences {
    pub preferred_format: ContentFormat,
    pub optimal_duration_minutes: u32,
    pub preferred_difficulty: Difficulty,
    pub preferred_language: String,
    pub favorite_publishers: Vec<String>,
    pub favorite_instructors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehavioralPatterns {
    pub peak_learning_hours: Vec<String>,
    pub avg_session_duration_minutes: u32,
    pub sessions_per_week: f64,
    pub learning_pace: LearningPace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillLevel {
    pub skill: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapSummary {
    pub skill: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillProfile {
    pub current_skills: Vec<SkillLevel>,
    pub skill_gaps: Vec<SkillGapSummary>,
    pub certifications_in_progress: Vec<String>,
    pub certifications_completed: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEngagement {
    pub engagement_score: u8,
    pub completion_rate_percent: f64,
    pub content_diversity_score: u8,
    pub motivation_level: Level,
    pub autonomy_score: u8,
    pub risk_of_churn: Level,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub profile_created_at: String,
    pub profile_updated_at: String,
    pub total_interactions: u32,
    pub total_content_viewed: u32,
    pub total_content_completed: u32,
    pub total_hours_learning: f64,
}

// ============= Recommender view of the profile =============

/// The slice of the learner profile the recommender works from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommenderProfile {
    pub user_id: String,
    pub content_preferences: PreferenceSummary,
    pub skill_gaps: Vec<SkillGapSummary>,
    pub learning_style: PartialStyle,
    pub behavioral_patterns: PatternSummary,
    pub engagement_metrics: EngagementSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceSummary {
    pub preferred_format: ContentFormat,
    pub optimal_duration_minutes: u32,
    pub preferred_difficulty: Difficulty,
    pub preferred_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialStyle {
    pub dominant_style: LearningStyle,
    pub scores: BTreeMap<String, u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSummary {
    pub peak_learning_hours: Vec<String>,
    pub sessions_per_week: f64,
    pub learning_pace: LearningPace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementSummary {
    pub engagement_score: u8,
    pub completion_rate_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(8.0, 90.0, EngagementTier::HighlyEngaged)]
    #[case(7.0, 90.0, EngagementTier::Engaged)]
    #[case(4.2, 68.0, EngagementTier::Casual)]
    #[case(5.0, 75.0, EngagementTier::Engaged)]
    #[case(1.2, 45.0, EngagementTier::AtRisk)]
    #[case(1.2, 60.0, EngagementTier::Casual)]
    fn test_engagement_tier_thresholds(
        #[case] sessions: f64,
        #[case] completion: f64,
        #[case] expected: EngagementTier,
    ) {
        assert_eq!(EngagementTier::classify(sessions, completion), expected);
    }

    #[test]
    fn test_engagement_tier_serialization() {
        assert_eq!(
            serde_json::to_string(&EngagementTier::AtRisk).unwrap(),
            "\"at-risk\""
        );
        assert_eq!(
            serde_json::to_string(&EngagementTier::HighlyEngaged).unwrap(),
            "\"highly-engaged\""
        );
    }

    #[test]
    fn test_dominant_learning_style() {
        let scores = LearningStyleScores {
            visual: 85,
            auditory: 45,
            reading_writing: 35,
            kinesthetic: 30,
        };
        assert_eq!(scores.dominant(), LearningStyle::Visual);

        let scores = LearningStyleScores {
            visual: 10,
            auditory: 20,
            reading_writing: 20,
            kinesthetic: 90,
        };
        assert_eq!(scores.dominant(), LearningStyle::Kinesthetic);
    }

    #[test]
    fn test_proficiency_ordering() {
        assert!(Proficiency::None < Proficiency::Beginner);
        assert!(Proficiency::Intermediate < Proficiency::Advanced);
    }

    #[test]
    fn test_interaction_type_parses_lowercase() {
        let parsed: InteractionType = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(parsed, InteractionType::Complete);
        assert!(serde_json::from_str::<InteractionType>("\"skim\"").is_err());
    }
}
