//! Path Recommender tools: catalog search, relevance scoring, learning paths
//! and next-best-content selection.

use crate::store::{LearningStore, NewRecommendation};
use crate::tools::registry::Tool;
use crate::tools::{args_schema, parse_args, require, to_json};
use crate::types::Result;
use crate::types::catalog::{CatalogQuery, RelevanceFactors};
use crate::types::learner::{ContentFormat, Difficulty};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

const DEFAULT_MAX_PATH_ITEMS: usize = 20;
const DEFAULT_NEXT_CONTENT_COUNT: usize = 5;

pub fn tools(store: &Arc<dyn LearningStore>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(RecommenderProfileTool::new(store.clone())),
        Arc::new(SearchContentCatalog::new(store.clone())),
        Arc::new(ContentRelevanceScore::new(store.clone())),
        Arc::new(BuildLearningPath::new(store.clone())),
        Arc::new(NextBestContent::new(store.clone())),
        Arc::new(LogRecommendation::new(store.clone())),
        Arc::new(PrerequisiteCompletion::new(store.clone())),
        Arc::new(ContentMetadataTool::new(store.clone())),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UserArgs {
    user_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ContentArgs {
    /// Catalog content identifier, e.g. V456
    content_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UserContentArgs {
    user_id: String,
    content_id: String,
}

store_tool!(RecommenderProfileTool);

#[async_trait]
impl Tool for RecommenderProfileTool {
    fn name(&self) -> &str {
        "get_learner_profile"
    }

    fn description(&self) -> &str {
        "Get the learner profile used for recommendations: preferences, skill gaps, learning style, patterns, engagement"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<UserArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: UserArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        to_json(&self.store.recommender_profile(&args.user_id).await?)
    }
}

fn default_limit() -> usize {
    CatalogQuery::DEFAULT_LIMIT
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CatalogArgs {
    /// Free-text search query
    #[serde(default)]
    query: Option<String>,
    /// Skills the content should cover
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    format: Option<ContentFormat>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    language: Option<String>,
    /// Longest acceptable content, in minutes
    #[serde(default)]
    duration_max_minutes: Option<u32>,
    /// Maximum number of results (default 10)
    #[serde(default = "default_limit")]
    limit: usize,
}

store_tool!(SearchContentCatalog);

#[async_trait]
impl Tool for SearchContentCatalog {
    fn name(&self) -> &str {
        "search_content_catalog"
    }

    fn description(&self) -> &str {
        "Search the content catalog with optional query, skills, format, difficulty, language and maximum duration filters"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<CatalogArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: CatalogArgs = parse_args(self.name(), args)?;
        let query = CatalogQuery {
            query: args.query,
            skills: args.skills,
            format: args.format,
            difficulty: args.difficulty,
            language: args.language,
            duration_max_minutes: args.duration_max_minutes,
            limit: args.limit,
        };
        debug!(?query, "catalog search");
        to_json(&self.store.search_catalog(&query).await?)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RelevanceArgs {
    /// Learner profile as returned by get_learner_profile
    #[serde(default)]
    user_profile: Value,
    content_id: String,
}

store_tool!(ContentRelevanceScore);

#[async_trait]
impl Tool for ContentRelevanceScore {
    fn name(&self) -> &str {
        "calculate_content_relevance_score"
    }

    fn description(&self) -> &str {
        "Score how relevant a content item is for a learner (0-100): skill gap match 40%, preference match 30%, engagement likelihood 30%"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<RelevanceArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: RelevanceArgs = parse_args(self.name(), args)?;
        require(self.name(), "content_id", &args.content_id)?;
        debug!(
            content_id = %args.content_id,
            with_profile = !args.user_profile.is_null(),
            "scoring content relevance"
        );

        // Fixed factors until a scoring model exists
        let factors = RelevanceFactors {
            skill_gap_match: 0.9,
            preference_match: 0.85,
            engagement_likelihood: 0.8,
        };

        Ok(json!({
            "content_id": args.content_id,
            "relevance_score": factors.score(),
            "factors": {
                "skill_gap_match": factors.skill_gap_match,
                "preference_match": factors.preference_match,
                "engagement_likelihood": factors.engagement_likelihood,
            },
        }))
    }
}

fn default_max_items() -> usize {
    DEFAULT_MAX_PATH_ITEMS
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PathArgs {
    /// Skill the path should teach
    skill_target: String,
    user_id: String,
    /// Upper bound on items across all phases (default 20)
    #[serde(default = "default_max_items")]
    max_content_items: usize,
}

store_tool!(BuildLearningPath);

#[async_trait]
impl Tool for BuildLearningPath {
    fn name(&self) -> &str {
        "build_learning_path"
    }

    fn description(&self) -> &str {
        "Build a phased learning path toward a target skill, from beginner to advanced, with checkpoints"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<PathArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: PathArgs = parse_args(self.name(), args)?;
        require(self.name(), "skill_target", &args.skill_target)?;
        require(self.name(), "user_id", &args.user_id)?;
        to_json(
            &self
                .store
                .learning_path(&args.skill_target, &args.user_id, args.max_content_items)
                .await?,
        )
    }
}

fn default_count() -> usize {
    DEFAULT_NEXT_CONTENT_COUNT
}

#[derive(Debug, Deserialize, JsonSchema)]
struct NextContentArgs {
    user_id: String,
    /// Number of items to return (default 5)
    #[serde(default = "default_count")]
    count: usize,
}

store_tool!(NextBestContent);

#[async_trait]
impl Tool for NextBestContent {
    fn name(&self) -> &str {
        "get_next_best_content"
    }

    fn description(&self) -> &str {
        "Pick the best content for the learner to take next, ranked by relevance"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<NextContentArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: NextContentArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        to_json(
            &self
                .store
                .next_best_content(&args.user_id, args.count)
                .await?,
        )
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct LogRecommendationArgs {
    user_id: String,
    content_id: String,
    /// Why the content was recommended, e.g. skill_gap_high_priority
    recommendation_reason: String,
    /// Free-form context of the recommendation
    #[serde(default)]
    context: Value,
}

store_tool!(LogRecommendation);

#[async_trait]
impl Tool for LogRecommendation {
    fn name(&self) -> &str {
        "log_recommendation"
    }

    fn description(&self) -> &str {
        "Record a recommendation shown to a learner so its outcome can be measured"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<LogRecommendationArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: LogRecommendationArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        require(self.name(), "content_id", &args.content_id)?;
        to_json(
            &self
                .store
                .record_recommendation(NewRecommendation {
                    user_id: args.user_id,
                    content_id: args.content_id,
                    recommendation_reason: args.recommendation_reason,
                    context: args.context,
                })
                .await?,
        )
    }
}

store_tool!(PrerequisiteCompletion);

#[async_trait]
impl Tool for PrerequisiteCompletion {
    fn name(&self) -> &str {
        "check_prerequisite_completion"
    }

    fn description(&self) -> &str {
        "Check whether a learner has completed the prerequisites of a content item"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<UserContentArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: UserContentArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        require(self.name(), "content_id", &args.content_id)?;
        to_json(
            &self
                .store
                .prerequisite_check(&args.user_id, &args.content_id)
                .await?,
        )
    }
}

store_tool!(ContentMetadataTool);

#[async_trait]
impl Tool for ContentMetadataTool {
    fn name(&self) -> &str {
        "get_content_metadata"
    }

    fn description(&self) -> &str {
        "Get full metadata for a content item: description, skills, objectives, instructor, ratings, URL"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<ContentArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: ContentArgs = parse_args(self.name(), args)?;
        require(self.name(), "content_id", &args.content_id)?;
        to_json(&self.store.content_metadata(&args.content_id).await?)
    }
}
