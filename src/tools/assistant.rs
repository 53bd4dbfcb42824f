//! Learning Assistant tools: knowledge base, content summaries, progress,
//! notifications, concept explanations and troubleshooting.

use crate::store::{LearningStore, NewChatInteraction, NewNotification};
use crate::tools::registry::Tool;
use crate::tools::{args_schema, parse_args, require, to_json};
use crate::types::Result;
use crate::types::assistant::{NotificationType, Satisfaction};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const DEFAULT_SIMILAR_COUNT: usize = 5;

pub fn tools(store: &Arc<dyn LearningStore>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(KnowledgeBaseSearch::new(store.clone())),
        Arc::new(ContentSummaryTool::new(store.clone())),
        Arc::new(SimilarContentSearch::new(store.clone())),
        Arc::new(LogChatbotInteraction::new(store.clone())),
        Arc::new(UserProgressTool::new(store.clone())),
        Arc::new(EncouragementNotification::new(store.clone())),
        Arc::new(ExplainConcept),
        Arc::new(TroubleshootingHelp::new(store.clone())),
        Arc::new(LearnerContextTool::new(store.clone())),
    ]
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UserArgs {
    user_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ContentArgs {
    content_id: String,
}

// ============= knowledge & content =============

#[derive(Debug, Deserialize, JsonSchema)]
struct KnowledgeArgs {
    /// The learner's question
    question: String,
    /// Extra context, such as the content being studied
    #[serde(default)]
    context: Option<String>,
}

store_tool!(KnowledgeBaseSearch);

#[async_trait]
impl Tool for KnowledgeBaseSearch {
    fn name(&self) -> &str {
        "search_edflex_knowledge_base"
    }

    fn description(&self) -> &str {
        "Search the Edflex knowledge base for articles that answer a learner's question"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<KnowledgeArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: KnowledgeArgs = parse_args(self.name(), args)?;
        require(self.name(), "question", &args.question)?;
        to_json(
            &self
                .store
                .knowledge_base(&args.question, args.context.as_deref())
                .await?,
        )
    }
}

store_tool!(ContentSummaryTool);

#[async_trait]
impl Tool for ContentSummaryTool {
    fn name(&self) -> &str {
        "get_content_summary"
    }

    fn description(&self) -> &str {
        "Summarize a content item: key concepts, objectives, audience, duration"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<ContentArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: ContentArgs = parse_args(self.name(), args)?;
        require(self.name(), "content_id", &args.content_id)?;
        to_json(&self.store.content_summary(&args.content_id).await?)
    }
}

fn default_similar_count() -> usize {
    DEFAULT_SIMILAR_COUNT
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SimilarArgs {
    content_id: String,
    /// Number of similar items to return (default 5)
    #[serde(default = "default_similar_count")]
    count: usize,
}

store_tool!(SimilarContentSearch);

#[async_trait]
impl Tool for SimilarContentSearch {
    fn name(&self) -> &str {
        "search_similar_content"
    }

    fn description(&self) -> &str {
        "Find content similar to a given item, with the reason for each match"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<SimilarArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: SimilarArgs = parse_args(self.name(), args)?;
        require(self.name(), "content_id", &args.content_id)?;
        to_json(
            &self
                .store
                .similar_content(&args.content_id, args.count)
                .await?,
        )
    }
}

// ============= interaction logging & engagement =============

#[derive(Debug, Deserialize, JsonSchema)]
struct ChatLogArgs {
    user_id: String,
    question: String,
    /// The answer given to the learner
    response: String,
    /// Satisfaction inferred from the learner's wording
    satisfaction_inferred: Satisfaction,
}

store_tool!(LogChatbotInteraction);

#[async_trait]
impl Tool for LogChatbotInteraction {
    fn name(&self) -> &str {
        "log_chatbot_interaction"
    }

    fn description(&self) -> &str {
        "Record a question/answer exchange with the inferred learner satisfaction (positive, neutral, negative)"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<ChatLogArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: ChatLogArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        to_json(
            &self
                .store
                .record_chat_interaction(NewChatInteraction {
                    user_id: args.user_id,
                    question: args.question,
                    response: args.response,
                    satisfaction_inferred: args.satisfaction_inferred,
                })
                .await?,
        )
    }
}

store_tool!(UserProgressTool);

#[async_trait]
impl Tool for UserProgressTool {
    fn name(&self) -> &str {
        "get_user_progress"
    }

    fn description(&self) -> &str {
        "Get a learner's progress: active paths, recent completions, achievements, certifications, streaks, milestones"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<UserArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: UserArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        to_json(&self.store.user_progress(&args.user_id).await?)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct NotificationArgs {
    user_id: String,
    /// Text shown to the learner
    message: String,
    notification_type: NotificationType,
}

store_tool!(EncouragementNotification);

#[async_trait]
impl Tool for EncouragementNotification {
    fn name(&self) -> &str {
        "send_encouragement_notification"
    }

    fn description(&self) -> &str {
        "Send the learner an encouragement notification (milestone, reminder or challenge)"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<NotificationArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: NotificationArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        require(self.name(), "message", &args.message)?;
        to_json(
            &self
                .store
                .send_notification(NewNotification {
                    user_id: args.user_id,
                    message: args.message,
                    notification_type: args.notification_type,
                })
                .await?,
        )
    }
}

// ============= explanations & support =============

/// How far an explanation is simplified. Unrecognized levels read as beginner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimplificationLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SimplificationLevel {
    pub fn parse(level: &str) -> Self {
        match level.trim().to_lowercase().as_str() {
            "intermediate" => SimplificationLevel::Intermediate,
            "advanced" => SimplificationLevel::Advanced,
            _ => SimplificationLevel::Beginner,
        }
    }
}

/// Templated explanation of `concept` at the given level.
pub fn explain(concept: &str, level: SimplificationLevel) -> String {
    match level {
        SimplificationLevel::Beginner => format!(
            "**{concept}** - Simple Explanation:

Think of {concept} like teaching someone a new skill. Instead of giving them a rulebook,
you show them many examples, and they learn the patterns themselves.

**Real-world example:**
- Netflix recommendations: The system learns what you like by watching what you watch
- Spam filters: Email learns to recognize spam by seeing many spam examples

**Key idea:**
Computers learn from data and improve over time, just like humans learn from experience.

Would you like to see some beginner courses on this topic?"
        ),
        SimplificationLevel::Intermediate => format!(
            "**{concept}** - Detailed Explanation:

{concept} is a method where algorithms improve their performance through experience.
Instead of explicit programming, the system learns patterns from training data.

**How it works:**
1. Feed data to the algorithm
2. Algorithm identifies patterns
3. Test on new data
4. Refine and improve

**Common techniques:**
- Supervised learning (labeled data)
- Unsupervised learning (pattern discovery)
- Reinforcement learning (trial and error)

**Applications:**
Recommendation systems, image recognition, NLP, fraud detection.

**Next steps:**
Check out intermediate courses that dive into algorithms and practical implementation."
        ),
        SimplificationLevel::Advanced => format!(
            "**{concept}** - Advanced Overview:

{concept} encompasses statistical learning theory, optimization algorithms, and model architectures
that enable systems to improve performance on specific tasks through experience.

**Core mathematical foundations:**
- Loss functions and gradient descent
- Regularization techniques (L1, L2)
- Cross-validation and bias-variance tradeoff
- Probabilistic graphical models

**State-of-the-art approaches:**
- Deep learning architectures (CNNs, RNNs, Transformers)
- Transfer learning and fine-tuning
- Federated learning for privacy
- AutoML and neural architecture search

**Research frontiers:**
Explainable AI, few-shot learning, continual learning, adversarial robustness.

**Resources:**
Advanced courses covering implementation, research papers, and case studies."
        ),
    }
}

fn default_level() -> String {
    "beginner".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ExplainArgs {
    /// The concept to explain
    concept: String,
    /// beginner, intermediate or advanced (default beginner)
    #[serde(default = "default_level")]
    simplification_level: String,
}

pub struct ExplainConcept;

#[async_trait]
impl Tool for ExplainConcept {
    fn name(&self) -> &str {
        "explain_concept"
    }

    fn description(&self) -> &str {
        "Explain a concept at a beginner, intermediate or advanced level"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<ExplainArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: ExplainArgs = parse_args(self.name(), args)?;
        require(self.name(), "concept", &args.concept)?;
        let level = SimplificationLevel::parse(&args.simplification_level);
        Ok(Value::String(explain(&args.concept, level)))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TroubleshootingArgs {
    /// The learner's description of the technical problem
    issue_description: String,
}

store_tool!(TroubleshootingHelp);

#[async_trait]
impl Tool for TroubleshootingHelp {
    fn name(&self) -> &str {
        "get_troubleshooting_help"
    }

    fn description(&self) -> &str {
        "Find step-by-step help for a technical issue (video playback, downloads, certificates), or escalate to support"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<TroubleshootingArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: TroubleshootingArgs = parse_args(self.name(), args)?;
        to_json(&self.store.troubleshooting(&args.issue_description).await?)
    }
}

store_tool!(LearnerContextTool);

#[async_trait]
impl Tool for LearnerContextTool {
    fn name(&self) -> &str {
        "get_learner_context"
    }

    fn description(&self) -> &str {
        "Get the learner's current context: role, active path, recent activity, preferences, streak"
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<UserArgs>()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: UserArgs = parse_args(self.name(), args)?;
        require(self.name(), "user_id", &args.user_id)?;
        to_json(&self.store.learner_context(&args.user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SampleLearningStore;
    use crate::types::AppError;
    use rstest::rstest;
    use serde_json::json;

    fn store() -> Arc<dyn LearningStore> {
        Arc::new(SampleLearningStore::new())
    }

    #[rstest]
    #[case("beginner", "Simple Explanation")]
    #[case("Intermediate", "Detailed Explanation")]
    #[case("advanced", "Advanced Overview")]
    #[case("expert", "Simple Explanation")]
    #[tokio::test]
    async fn test_explain_concept_levels(#[case] level: &str, #[case] heading: &str) {
        let result = ExplainConcept
            .execute(json!({"concept": "Machine Learning", "simplification_level": level}))
            .await
            .unwrap();
        let text = result.as_str().unwrap();
        assert!(text.starts_with(&format!("**Machine Learning** - {}", heading)));
    }

    #[tokio::test]
    async fn test_explain_concept_defaults_to_beginner() {
        let result = ExplainConcept
            .execute(json!({"concept": "SEO"}))
            .await
            .unwrap();
        assert!(result.as_str().unwrap().contains("Think of SEO like teaching"));
    }

    #[rstest]
    #[case("My VIDEO keeps buffering", true, "Video buffering or won't play")]
    #[case("I can't download the PDF", true, "Cannot download content")]
    #[case("Where is my certificate?", true, "Cannot generate certificate")]
    #[case("The quiz page is blank", false, "The quiz page is blank")]
    #[tokio::test]
    async fn test_troubleshooting(
        #[case] issue: &str,
        #[case] found: bool,
        #[case] expected_issue: &str,
    ) {
        let result = TroubleshootingHelp::new(store())
            .execute(json!({"issue_description": issue}))
            .await
            .unwrap();
        assert_eq!(result["solution_found"], found);
        assert_eq!(result["issue"], expected_issue);
        if !found {
            assert_eq!(result["escalate_to_support"], true);
            assert_eq!(result["support_contact"], "support@edflex.com");
        }
    }

    #[tokio::test]
    async fn test_similar_content_count() {
        let tool = SimilarContentSearch::new(store());
        let all = tool.execute(json!({"content_id": "V456"})).await.unwrap();
        assert_eq!(all.as_array().unwrap().len(), 3);
        let two = tool
            .execute(json!({"content_id": "V456", "count": 2}))
            .await
            .unwrap();
        assert_eq!(two[1]["content_id"], "A234");
        assert_eq!(two.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_notification_message_names_type() {
        let result = EncouragementNotification::new(store())
            .execute(json!({
                "user_id": "User123",
                "message": "7 day streak!",
                "notification_type": "milestone"
            }))
            .await
            .unwrap();
        assert_eq!(result["status"], "sent");
        assert_eq!(result["message"], "Sent milestone notification to User123");
        assert!(result["notification_id"].as_str().unwrap().starts_with("notif_"));
    }

    #[tokio::test]
    async fn test_notification_type_is_checked() {
        let err = EncouragementNotification::new(store())
            .execute(json!({"user_id": "u1", "message": "hi", "notification_type": "spam"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_log_chatbot_interaction() {
        let result = LogChatbotInteraction::new(store())
            .execute(json!({
                "user_id": "User123",
                "question": "What is ML?",
                "response": "Machine learning is...",
                "satisfaction_inferred": "positive"
            }))
            .await
            .unwrap();
        assert_eq!(result["status"], "logged");
        assert_eq!(result["message"], "Logged chatbot interaction for User123");
        assert!(result["interaction_id"].as_str().unwrap().starts_with("chat_"));
    }

    #[tokio::test]
    async fn test_read_tools() {
        let kb = KnowledgeBaseSearch::new(store())
            .execute(json!({"question": "What is machine learning?"}))
            .await
            .unwrap();
        assert_eq!(kb[0]["article_id"], "kb_ml_001");
        assert_eq!(kb[1]["article_id"], "kb_ml_002");

        let context = LearnerContextTool::new(store())
            .execute(json!({"user_id": "User123"}))
            .await
            .unwrap();
        assert_eq!(context["name"], "Alice");
        assert_eq!(context["job_role"], "Marketing Manager");

        let progress = UserProgressTool::new(store())
            .execute(json!({"user_id": "User123"}))
            .await
            .unwrap();
        assert_eq!(progress["current_streak_days"], 7);
    }
}
