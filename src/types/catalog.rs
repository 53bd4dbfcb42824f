use crate::types::learner::{ContentFormat, Difficulty};
use serde::{Deserialize, Serialize};

/// A catalog entry as returned by catalog search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub content_id: String,
    pub title: String,
    pub description: String,
    pub format: ContentFormat,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
    pub language: String,
    pub skills_covered: Vec<String>,
    pub publisher: String,
    pub instructor: String,
    pub quality_score: u8,
    pub average_rating: f64,
    pub total_reviews: u32,
    pub prerequisites: Vec<String>,
    pub learning_objectives: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Filters accepted by catalog search. Unset fields do not filter, and a
/// maximum duration of 0 means no duration limit.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub query: Option<String>,
    pub skills: Vec<String>,
    pub format: Option<ContentFormat>,
    pub difficulty: Option<Difficulty>,
    pub language: Option<String>,
    pub duration_max_minutes: Option<u32>,
    pub limit: usize,
}

impl CatalogQuery {
    pub const DEFAULT_LIMIT: usize = 10;

    /// Apply the structured filters (format, difficulty, maximum duration) and the limit.
    pub fn apply(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        items
            .into_iter()
            .filter(|item| self.format.is_none_or(|f| item.format == f))
            .filter(|item| self.difficulty.is_none_or(|d| item.difficulty == d))
            .filter(|item| {
                self.duration_max_minutes
                    .filter(|max| *max > 0)
                    .is_none_or(|max| item.duration_minutes <= max)
            })
            .take(self.limit)
            .collect()
    }
}

/// Inputs to the weighted relevance score. Each match is in `0.0..=1.0`.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceFactors {
    pub skill_gap_match: f64,
    pub preference_match: f64,
    pub engagement_likelihood: f64,
}

impl RelevanceFactors {
    pub const SKILL_WEIGHT: f64 = 40.0;
    pub const PREFERENCE_WEIGHT: f64 = 30.0;
    pub const ENGAGEMENT_WEIGHT: f64 = 30.0;

    /// Weighted 0-100 score rounded to one decimal place.
    pub fn score(&self) -> f64 {
        let total = self.skill_gap_match * Self::SKILL_WEIGHT
            + self.preference_match * Self::PREFERENCE_WEIGHT
            + self.engagement_likelihood * Self::ENGAGEMENT_WEIGHT;
        (total * 10.0).round() / 10.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPath {
    pub skill_target: String,
    pub user_id: String,
    pub path_generated_at: String,
    pub total_content_items: u32,
    pub estimated_total_duration_hours: u32,
    pub estimated_completion_date: String,
    pub difficulty_progression: String,
    pub phases: Vec<PathPhase>,
    pub prerequisites: Vec<String>,
    pub certification_available: String,
    pub personalization_notes: String,
}

impl LearningPath {
    /// Drop path items past `max_items`, removing phases left empty.
    ///
    /// A phase that loses items is re-estimated from the items it keeps, and
    /// the path totals are recomputed from the remaining phases.
    pub fn truncate_items(&mut self, max_items: usize) {
        if self.item_count() <= max_items {
            return;
        }

        let mut remaining = max_items;
        for phase in &mut self.phases {
            let keep = phase.content_items.len().min(remaining);
            if keep < phase.content_items.len() {
                phase.content_items.truncate(keep);
                let minutes: u32 = phase.content_items.iter().map(|i| i.duration_minutes).sum();
                phase.phase_duration_hours = minutes.div_ceil(60);
            }
            remaining -= keep;
        }
        self.phases.retain(|phase| !phase.content_items.is_empty());

        self.total_content_items = u32::try_from(self.item_count()).unwrap_or(u32::MAX);
        self.estimated_total_duration_hours =
            self.phases.iter().map(|p| p.phase_duration_hours).sum();
    }

    pub fn item_count(&self) -> usize {
        self.phases.iter().map(|p| p.content_items.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathPhase {
    pub phase: u32,
    pub phase_name: String,
    pub phase_duration_hours: u32,
    pub checkpoint: String,
    pub content_items: Vec<PathItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathItem {
    pub sequence: u32,
    pub content_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub format: ContentFormat,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
    pub skills_covered: Vec<String>,
    pub why_included: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextContent {
    pub content_id: String,
    pub title: String,
    pub format: ContentFormat,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
    pub skills_covered: Vec<String>,
    pub relevance_score: u8,
    pub recommendation_reason: String,
    pub context: String,
    pub estimated_value: String,
    pub engagement_prediction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationLog {
    pub recommendation_id: String,
    pub user_id: String,
    pub content_id: String,
    pub recommendation_reason: String,
    pub context: serde_json::Value,
    pub timestamp: String,
    pub clicked: Option<bool>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedRecommendation {
    pub status: String,
    pub recommendation_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrerequisiteCheck {
    pub content_id: String,
    pub user_id: String,
    pub prerequisites_met: bool,
    pub missing_prerequisites: Vec<String>,
    pub completion_percentage: f64,
    pub ready_to_start: bool,
    pub recommended_next_step: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub content_id: String,
    pub title: String,
    pub description: String,
    pub format: ContentFormat,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
    pub language: String,
    pub skills_covered: Vec<String>,
    pub prerequisites: Vec<String>,
    pub learning_objectives: Vec<String>,
    pub publisher: String,
    pub instructor: String,
    pub instructor_bio: String,
    pub quality_score: u8,
    pub average_rating: f64,
    pub total_reviews: u32,
    pub completion_rate: f64,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, format: ContentFormat, difficulty: Difficulty, minutes: u32) -> CatalogItem {
        CatalogItem {
            content_id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            format,
            duration_minutes: minutes,
            difficulty,
            language: "English".to_string(),
            skills_covered: vec![],
            publisher: String::new(),
            instructor: String::new(),
            quality_score: 0,
            average_rating: 0.0,
            total_reviews: 0,
            prerequisites: vec![],
            learning_objectives: vec![],
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            item("V1", ContentFormat::Video, Difficulty::Beginner, 15),
            item("A1", ContentFormat::Article, Difficulty::Beginner, 10),
            item("V2", ContentFormat::Video, Difficulty::Advanced, 45),
        ]
    }

    #[test]
    fn test_query_without_filters_keeps_everything_up_to_limit() {
        let query = CatalogQuery {
            limit: CatalogQuery::DEFAULT_LIMIT,
            ..Default::default()
        };
        assert_eq!(query.apply(catalog()).len(), 3);

        let query = CatalogQuery {
            limit: 2,
            ..Default::default()
        };
        let ids: Vec<_> = query.apply(catalog()).into_iter().map(|i| i.content_id).collect();
        assert_eq!(ids, vec!["V1", "A1"]);
    }

    #[test]
    fn test_query_filters_combine() {
        let query = CatalogQuery {
            format: Some(ContentFormat::Video),
            duration_max_minutes: Some(20),
            limit: 10,
            ..Default::default()
        };
        let ids: Vec<_> = query.apply(catalog()).into_iter().map(|i| i.content_id).collect();
        assert_eq!(ids, vec!["V1"]);

        let query = CatalogQuery {
            difficulty: Some(Difficulty::Intermediate),
            limit: 10,
            ..Default::default()
        };
        assert!(query.apply(catalog()).is_empty());
    }

    #[test]
    fn test_relevance_score_weights() {
        let factors = RelevanceFactors {
            skill_gap_match: 0.9,
            preference_match: 0.85,
            engagement_likelihood: 0.8,
        };
        assert_eq!(factors.score(), 85.5);

        let perfect = RelevanceFactors {
            skill_gap_match: 1.0,
            preference_match: 1.0,
            engagement_likelihood: 1.0,
        };
        assert_eq!(perfect.score(), 100.0);
    }
}
