use super::{LearningStore, NewChatInteraction, NewInteraction, NewNotification, NewRecommendation};
use crate::types::assistant::{
    Achievement, Acknowledgement, ActivePath, CertificationProgress, ChatLogEntry, Completion,
    ContentRef, ContentSummary, ContextPreferences, KnowledgeArticle, LearnerContext, Milestone,
    Notification, SimilarContent, TroubleshootingAnswer, UserProgress,
};
use crate::types::catalog::{
    CatalogItem, CatalogQuery, ContentMetadata, LearningPath, LoggedRecommendation, NextContent,
    PathItem, PathPhase, PrerequisiteCheck, RecommendationLog,
};
use crate::types::learner::{
    BehaviorEvent, BehavioralPatterns, ContentFormat, ContentPreferences, Difficulty,
    EngagementMetrics, EngagementSummary, EngagementTier, InteractionRecord, InteractionType,
    LearnerProfile, LearningPace, LearningStyle, LearningStyleReport, LearningStyleScores,
    LearningStyleSummary, Level, PartialStyle, PatternSummary, PreferenceSummary, Priority,
    ProfileEngagement, ProfileMetadata, Proficiency, RecommenderProfile, SkillGap,
    SkillGapSummary, SkillLevel, SkillProfile, TrackedInteraction,
};
use crate::types::{AppError, Result, utc_timestamp};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use tracing::info;

const SUPPORT_CONTACT: &str = "support@edflex.com";

/// Store that answers from a fixed sample data set.
///
/// Writes are logged as structured `tracing` events under the
/// `edflex::store` target and are not retained.
#[derive(Debug, Default, Clone)]
pub struct SampleLearningStore;

impl SampleLearningStore {
    pub fn new() -> Self {
        Self
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `<prefix>_<n>` with n below 100000, stable for identical inputs.
fn hashed_id(prefix: &str, parts: &[&str]) -> String {
    let mut hasher = DefaultHasher::new();
    for part in parts {
        part.hash(&mut hasher);
    }
    format!("{}_{}", prefix, hasher.finish() % 100_000)
}

/// `<prefix>_<n>` unique per call.
fn fresh_id(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4();
    format!("{}_{}", prefix, id.as_u128() % 100_000)
}

fn style_scores() -> LearningStyleScores {
    LearningStyleScores {
        visual: 85,
        auditory: 45,
        reading_writing: 35,
        kinesthetic: 30,
    }
}

fn catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem {
            content_id: "V456".into(),
            title: "Introduction to Data Analytics".into(),
            description: "Learn the fundamentals of data analytics including data collection, cleaning, and visualization".into(),
            format: ContentFormat::Video,
            duration_minutes: 15,
            difficulty: Difficulty::Beginner,
            language: "English".into(),
            skills_covered: strings(&["Data Analytics", "Statistics Basics"]),
            publisher: "LinkedIn Learning".into(),
            instructor: "John Data".into(),
            quality_score: 92,
            average_rating: 4.7,
            total_reviews: 1240,
            prerequisites: vec![],
            learning_objectives: strings(&[
                "Understand what data analytics is",
                "Learn basic statistical concepts",
                "Create simple data visualizations",
            ]),
            created_at: "2024-06-15".into(),
            updated_at: "2025-09-01".into(),
        },
        CatalogItem {
            content_id: "V789".into(),
            title: "Data Analytics with Excel".into(),
            description: "Master data analytics using Excel's powerful features".into(),
            format: ContentFormat::Video,
            duration_minutes: 18,
            difficulty: Difficulty::Beginner,
            language: "English".into(),
            skills_covered: strings(&["Data Analytics", "Excel", "Pivot Tables"]),
            publisher: "Coursera".into(),
            instructor: "Sarah Excel".into(),
            quality_score: 88,
            average_rating: 4.5,
            total_reviews: 890,
            prerequisites: vec![],
            learning_objectives: strings(&[
                "Use Excel for data analysis",
                "Create pivot tables and charts",
                "Apply formulas for analytics",
            ]),
            created_at: "2024-08-20".into(),
            updated_at: "2025-08-15".into(),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn path_item(
    sequence: u32,
    content_id: &str,
    title: String,
    format: ContentFormat,
    duration_minutes: u32,
    difficulty: Difficulty,
    skill: &str,
    why_included: &str,
) -> PathItem {
    PathItem {
        sequence,
        content_id: content_id.into(),
        title,
        item_type: "content".into(),
        format,
        duration_minutes,
        difficulty,
        skills_covered: vec![skill.to_string()],
        why_included: why_included.into(),
    }
}

fn troubleshooting_entry(
    issue: &str,
    steps: &[&str],
    resolution_time: &str,
) -> TroubleshootingAnswer {
    TroubleshootingAnswer {
        issue: issue.into(),
        solution_found: true,
        solution_steps: strings(steps),
        estimated_resolution_time: Some(resolution_time.into()),
        escalate_if_unresolved: Some(true),
        message: None,
        escalate_to_support: None,
        support_contact: None,
    }
}

#[async_trait]
impl LearningStore for SampleLearningStore {
    async fn record_interaction(&self, interaction: NewInteraction) -> Result<TrackedInteraction> {
        let interaction_id = hashed_id(
            "int",
            &[
                &interaction.user_id,
                &interaction.content_id,
                &interaction.timestamp,
            ],
        );
        let record = InteractionRecord {
            interaction_id: interaction_id.clone(),
            user_id: interaction.user_id,
            content_id: interaction.content_id,
            interaction_type: interaction.interaction_type,
            duration_seconds: interaction.duration_seconds,
            completion_percentage: interaction.completion_percentage,
            timestamp: interaction.timestamp,
            stored_at: utc_timestamp(),
        };

        info!(
            target: "edflex::store",
            interaction_id = %record.interaction_id,
            user_id = %record.user_id,
            content_id = %record.content_id,
            interaction_type = %record.interaction_type,
            duration_seconds = record.duration_seconds,
            completion_percentage = record.completion_percentage,
            "content interaction tracked"
        );

        Ok(TrackedInteraction {
            status: "success".into(),
            interaction_id,
            message: format!(
                "Tracked {} interaction for user {} on content {}",
                record.interaction_type, record.user_id, record.content_id
            ),
            stored_at: record.stored_at,
        })
    }

    async fn behavior_history(&self, user_id: &str, _days_back: u32) -> Result<Vec<BehaviorEvent>> {
        let event = |id: &str,
                     content_id: &str,
                     title: &str,
                     format: ContentFormat,
                     difficulty: Difficulty,
                     kind: InteractionType,
                     seconds: u64,
                     completion: f64,
                     timestamp: &str| BehaviorEvent {
            interaction_id: id.into(),
            user_id: user_id.into(),
            content_id: content_id.into(),
            content_title: title.into(),
            content_format: format,
            content_difficulty: difficulty,
            interaction_type: kind,
            duration_seconds: seconds,
            completion_percentage: completion,
            timestamp: timestamp.into(),
        };

        Ok(vec![
            event(
                "int_98765",
                "V456",
                "Introduction to Data Analytics",
                ContentFormat::Video,
                Difficulty::Intermediate,
                InteractionType::Complete,
                720,
                1.0,
                "2025-10-05T18:20:00Z",
            ),
            event(
                "int_98764",
                "A123",
                "Excel for Data Analysis",
                ContentFormat::Article,
                Difficulty::Beginner,
                InteractionType::View,
                600,
                0.75,
                "2025-10-04T19:15:00Z",
            ),
            event(
                "int_98763",
                "V789",
                "Python Basics",
                ContentFormat::Video,
                Difficulty::Beginner,
                InteractionType::Complete,
                900,
                1.0,
                "2025-10-03T07:30:00Z",
            ),
        ])
    }

    async fn learning_style(&self, user_id: &str) -> Result<LearningStyleReport> {
        let scores = style_scores();
        Ok(LearningStyleReport {
            user_id: user_id.into(),
            dominant_style: scores.dominant(),
            learning_styles: scores,
            confidence: 0.85,
            based_on_interactions: 247,
            calculated_at: utc_timestamp(),
        })
    }

    async fn skill_gaps(&self, _user_id: &str, _job_role: &str) -> Result<Vec<SkillGap>> {
        Ok(vec![
            SkillGap {
                skill: "Data Analytics".into(),
                priority: Priority::High,
                current_proficiency: Proficiency::Beginner,
                required_proficiency: Proficiency::Intermediate,
                gap_size: 2,
                reason: "Required for role, not yet explored".into(),
                estimated_learning_hours: 20,
                trending_skill: true,
                user_interest_score: 0.7,
            },
            SkillGap {
                skill: "SEO Strategy".into(),
                priority: Priority::Medium,
                current_proficiency: Proficiency::None,
                required_proficiency: Proficiency::Beginner,
                gap_size: 1,
                reason: "User searched twice, 0% progress".into(),
                estimated_learning_hours: 10,
                trending_skill: false,
                user_interest_score: 0.85,
            },
            SkillGap {
                skill: "Content Marketing".into(),
                priority: Priority::Medium,
                current_proficiency: Proficiency::Beginner,
                required_proficiency: Proficiency::Intermediate,
                gap_size: 1,
                reason: "70% complete on current learning path - quick win opportunity".into(),
                estimated_learning_hours: 5,
                trending_skill: false,
                user_interest_score: 0.9,
            },
        ])
    }

    async fn engagement_metrics(
        &self,
        user_id: &str,
        period_days: u32,
    ) -> Result<EngagementMetrics> {
        let now = Utc::now();
        let start = now
            .checked_sub_signed(Duration::days(i64::from(period_days)))
            .ok_or_else(|| {
                AppError::InvalidInput(format!("period_days out of range: {}", period_days))
            })?;
        let sessions_per_week = 4.2;
        let completion_rate_percent = 68.0;
        let rfc = |t: chrono::DateTime<Utc>| t.to_rfc3339_opts(chrono::SecondsFormat::Micros, true);

        Ok(EngagementMetrics {
            user_id: user_id.into(),
            period_days,
            period_start: rfc(start),
            period_end: rfc(now),
            sessions_per_week,
            avg_session_duration_minutes: 25,
            total_time_spent_minutes: 420,
            content_viewed: 12,
            content_completed: 8,
            completion_rate_percent,
            content_diversity_score: 55,
            formats_used: vec![
                ContentFormat::Video,
                ContentFormat::Article,
                ContentFormat::Podcast,
            ],
            topics_explored: strings(&["Data Analytics", "Marketing", "Excel"]),
            engagement_score: 72,
            engagement_trend: "increasing".into(),
            days_since_last_active: 1,
            longest_streak_days: 7,
            current_streak_days: 3,
            risk_of_churn: Level::Low,
            churn_risk_factors: vec![],
            engagement_tier: EngagementTier::Engaged,
            threshold_tier: EngagementTier::classify(sessions_per_week, completion_rate_percent),
        })
    }

    async fn full_profile(&self, user_id: &str) -> Result<LearnerProfile> {
        let now = utc_timestamp();
        let scores = style_scores();
        Ok(LearnerProfile {
            user_id: user_id.into(),
            profile_updated_at: now.clone(),
            learning_style: LearningStyleSummary {
                dominant_style: scores.dominant(),
                scores,
            },
            content_preferences: ContentPreferences {
                preferred_format: ContentFormat::Video,
                optimal_duration_minutes: 12,
                preferred_difficulty: Difficulty::Intermediate,
                preferred_language: "English".into(),
                favorite_publishers: strings(&["LinkedIn Learning", "Coursera"]),
                favorite_instructors: strings(&["John Doe", "Jane Smith"]),
            },
            behavioral_patterns: BehavioralPatterns {
                peak_learning_hours: strings(&["18:00-20:00", "07:00-08:00"]),
                avg_session_duration_minutes: 25,
                sessions_per_week: 4.2,
                learning_pace: LearningPace::Moderate,
            },
            skill_profile: SkillProfile {
                current_skills: vec![
                    SkillLevel {
                        skill: "Digital Marketing".into(),
                        proficiency: Proficiency::Intermediate,
                    },
                    SkillLevel {
                        skill: "Social Media Strategy".into(),
                        proficiency: Proficiency::Advanced,
                    },
                ],
                skill_gaps: vec![
                    SkillGapSummary {
                        skill: "Data Analytics".into(),
                        priority: Priority::High,
                        reason: Some("Required for role, not yet explored".into()),
                    },
                    SkillGapSummary {
                        skill: "SEO Strategy".into(),
                        priority: Priority::Medium,
                        reason: Some("User searched twice, 0% progress".into()),
                    },
                ],
                certifications_in_progress: strings(&["Google Analytics Certification"]),
                certifications_completed: strings(&["HubSpot Content Marketing"]),
            },
            engagement_metrics: ProfileEngagement {
                engagement_score: 72,
                completion_rate_percent: 68.0,
                content_diversity_score: 55,
                motivation_level: Level::Medium,
                autonomy_score: 78,
                risk_of_churn: Level::Low,
            },
            metadata: ProfileMetadata {
                profile_created_at: "2025-08-15T10:00:00Z".into(),
                profile_updated_at: now,
                total_interactions: 247,
                total_content_viewed: 89,
                total_content_completed: 61,
                total_hours_learning: 42.5,
            },
        })
    }

    async fn recommender_profile(&self, user_id: &str) -> Result<RecommenderProfile> {
        let mut scores = BTreeMap::new();
        scores.insert("visual".to_string(), 85);
        scores.insert("auditory".to_string(), 45);

        Ok(RecommenderProfile {
            user_id: user_id.into(),
            content_preferences: PreferenceSummary {
                preferred_format: ContentFormat::Video,
                optimal_duration_minutes: 15,
                preferred_difficulty: Difficulty::Intermediate,
                preferred_language: "English".into(),
            },
            skill_gaps: vec![
                SkillGapSummary {
                    skill: "Data Analytics".into(),
                    priority: Priority::High,
                    reason: None,
                },
                SkillGapSummary {
                    skill: "SEO Strategy".into(),
                    priority: Priority::Medium,
                    reason: None,
                },
            ],
            learning_style: PartialStyle {
                dominant_style: LearningStyle::Visual,
                scores,
            },
            behavioral_patterns: PatternSummary {
                peak_learning_hours: strings(&["18:00-20:00"]),
                sessions_per_week: 4.2,
                learning_pace: LearningPace::Moderate,
            },
            engagement_metrics: EngagementSummary {
                engagement_score: 72,
                completion_rate_percent: 68.0,
            },
        })
    }

    async fn search_catalog(&self, query: &CatalogQuery) -> Result<Vec<CatalogItem>> {
        Ok(query.apply(catalog()))
    }

    async fn learning_path(
        &self,
        skill_target: &str,
        user_id: &str,
        max_content_items: usize,
    ) -> Result<LearningPath> {
        let completion = (Utc::now() + Duration::days(35)).format("%Y-%m-%d");

        let mut path = LearningPath {
            skill_target: skill_target.into(),
            user_id: user_id.into(),
            path_generated_at: utc_timestamp(),
            total_content_items: 12,
            estimated_total_duration_hours: 24,
            estimated_completion_date: completion.to_string(),
            difficulty_progression: "beginner_to_advanced".into(),
            phases: vec![
                PathPhase {
                    phase: 1,
                    phase_name: "Foundations".into(),
                    phase_duration_hours: 8,
                    checkpoint: format!("Quiz: Foundations of {}", skill_target),
                    content_items: vec![
                        path_item(
                            1,
                            "V001",
                            format!("{} Basics", skill_target),
                            ContentFormat::Video,
                            20,
                            Difficulty::Beginner,
                            skill_target,
                            "Introduction to core concepts",
                        ),
                        path_item(
                            2,
                            "A002",
                            format!("{} Setup Guide", skill_target),
                            ContentFormat::Article,
                            15,
                            Difficulty::Beginner,
                            skill_target,
                            "Hands-on environment setup",
                        ),
                    ],
                },
                PathPhase {
                    phase: 2,
                    phase_name: "Core Concepts".into(),
                    phase_duration_hours: 10,
                    checkpoint: "Project: Build a simple application".into(),
                    content_items: vec![path_item(
                        3,
                        "V003",
                        format!("Intermediate {}", skill_target),
                        ContentFormat::Video,
                        45,
                        Difficulty::Intermediate,
                        skill_target,
                        "Building on foundations",
                    )],
                },
            ],
            prerequisites: vec![],
            certification_available: format!("{} Certification", skill_target),
            personalization_notes:
                "Path adapted to your visual learning preference with 70% video content".into(),
        };

        path.truncate_items(max_content_items);
        Ok(path)
    }

    async fn next_best_content(&self, _user_id: &str, count: usize) -> Result<Vec<NextContent>> {
        let mut items = vec![
            NextContent {
                content_id: "V456".into(),
                title: "Introduction to Data Analytics".into(),
                format: ContentFormat::Video,
                duration_minutes: 15,
                difficulty: Difficulty::Beginner,
                skills_covered: strings(&["Data Analytics", "Statistics"]),
                relevance_score: 92,
                recommendation_reason: "skill_gap_high_priority".into(),
                context: "Addresses your top skill gap (Data Analytics)".into(),
                estimated_value: "high".into(),
                engagement_prediction: 0.88,
            },
            NextContent {
                content_id: "A123".into(),
                title: "Excel for Data Analysis".into(),
                format: ContentFormat::Article,
                duration_minutes: 10,
                difficulty: Difficulty::Beginner,
                skills_covered: strings(&["Excel", "Data Analytics"]),
                relevance_score: 85,
                recommendation_reason: "complementary_skill_format_diversity".into(),
                context: "Complements Data Analytics with practical Excel skills".into(),
                estimated_value: "medium".into(),
                engagement_prediction: 0.82,
            },
        ];
        items.truncate(count);
        Ok(items)
    }

    async fn record_recommendation(
        &self,
        recommendation: NewRecommendation,
    ) -> Result<LoggedRecommendation> {
        let entry = RecommendationLog {
            recommendation_id: fresh_id("rec"),
            user_id: recommendation.user_id,
            content_id: recommendation.content_id,
            recommendation_reason: recommendation.recommendation_reason,
            context: recommendation.context,
            timestamp: utc_timestamp(),
            clicked: None,
            completed: None,
        };

        info!(
            target: "edflex::store",
            recommendation_id = %entry.recommendation_id,
            user_id = %entry.user_id,
            content_id = %entry.content_id,
            reason = %entry.recommendation_reason,
            context = %entry.context,
            "recommendation logged"
        );

        Ok(LoggedRecommendation {
            status: "logged".into(),
            message: format!(
                "Logged recommendation of {} to {}",
                entry.content_id, entry.user_id
            ),
            recommendation_id: entry.recommendation_id,
        })
    }

    async fn prerequisite_check(
        &self,
        user_id: &str,
        content_id: &str,
    ) -> Result<PrerequisiteCheck> {
        Ok(PrerequisiteCheck {
            content_id: content_id.into(),
            user_id: user_id.into(),
            prerequisites_met: true,
            missing_prerequisites: vec![],
            completion_percentage: 1.0,
            ready_to_start: true,
            recommended_next_step: "You can start this content now".into(),
        })
    }

    async fn content_metadata(&self, content_id: &str) -> Result<ContentMetadata> {
        Ok(ContentMetadata {
            content_id: content_id.into(),
            title: "Introduction to Data Analytics".into(),
            description: "Learn the fundamentals of data analytics including data collection, cleaning, and visualization techniques".into(),
            format: ContentFormat::Video,
            duration_minutes: 15,
            difficulty: Difficulty::Beginner,
            language: "English".into(),
            skills_covered: strings(&["Data Analytics", "Statistics Basics", "Data Visualization"]),
            prerequisites: vec![],
            learning_objectives: strings(&[
                "Understand what data analytics is and its applications",
                "Learn basic statistical concepts",
                "Create simple data visualizations",
            ]),
            publisher: "LinkedIn Learning".into(),
            instructor: "John Data".into(),
            instructor_bio: "20+ years experience in data science".into(),
            quality_score: 92,
            average_rating: 4.7,
            total_reviews: 1240,
            completion_rate: 0.78,
            tags: strings(&["data", "analytics", "beginner", "statistics"]),
            created_at: "2024-06-15".into(),
            updated_at: "2025-09-01".into(),
            url: format!("https://edflex.com/content/{}", content_id),
        })
    }

    async fn knowledge_base(
        &self,
        _question: &str,
        _context: Option<&str>,
    ) -> Result<Vec<KnowledgeArticle>> {
        Ok(vec![
            KnowledgeArticle {
                article_id: "kb_ml_001".into(),
                title: "Introduction to Machine Learning".into(),
                summary: "Machine learning is a subset of AI where computers learn from data patterns".into(),
                content: "Machine learning (ML) is a method of data analysis that automates analytical model building. \
It is a branch of artificial intelligence based on the idea that systems can learn from data, \
identify patterns and make decisions with minimal human intervention.\n\n\
Types of machine learning:\n\
1. Supervised Learning: Learning from labeled data\n\
2. Unsupervised Learning: Finding patterns in unlabeled data\n\
3. Reinforcement Learning: Learning through trial and error\n\n\
Common applications:\n\
- Recommendation systems (Netflix, Amazon)\n\
- Image recognition\n\
- Natural language processing\n\
- Fraud detection".into(),
                relevance_score: 0.95,
                source: "internal_kb".into(),
                related_content: strings(&["V456", "A789"]),
                last_updated: "2025-09-15".into(),
            },
            KnowledgeArticle {
                article_id: "kb_ml_002".into(),
                title: "Machine Learning vs AI vs Deep Learning".into(),
                summary: "Understanding the differences between AI, ML, and Deep Learning".into(),
                content: "AI is the broader concept, ML is a subset of AI, and Deep Learning is a subset of ML...".into(),
                relevance_score: 0.82,
                source: "internal_kb".into(),
                related_content: strings(&["V123"]),
                last_updated: "2025-08-20".into(),
            },
        ])
    }

    async fn content_summary(&self, content_id: &str) -> Result<ContentSummary> {
        Ok(ContentSummary {
            content_id: content_id.into(),
            title: "Introduction to Data Analytics".into(),
            summary: "Learn the fundamentals of data analytics including data collection, cleaning, and visualization. Perfect for beginners with no prior experience.".into(),
            key_concepts: strings(&[
                "Data collection methods",
                "Data cleaning techniques",
                "Basic statistical analysis",
                "Data visualization principles",
            ]),
            learning_objectives: strings(&[
                "Understand what data analytics is",
                "Perform basic data cleaning",
                "Create simple visualizations",
            ]),
            format: ContentFormat::Video,
            duration_minutes: 15,
            difficulty: Difficulty::Beginner,
            language: "English".into(),
            prerequisites: vec![],
            who_should_take: "Beginners interested in data analytics, marketing professionals, business analysts".into(),
            what_youll_learn: "By the end of this course, you'll understand data analytics fundamentals and be able to analyze simple datasets".into(),
            instructor: "John Data".into(),
            publisher: "LinkedIn Learning".into(),
            average_rating: 4.7,
            completion_time: "15-20 minutes".into(),
        })
    }

    async fn similar_content(&self, _content_id: &str, count: usize) -> Result<Vec<SimilarContent>> {
        let similar = |id: &str,
                       title: &str,
                       format: ContentFormat,
                       minutes: u32,
                       score: f64,
                       reason: &str,
                       why: &str| SimilarContent {
            content_id: id.into(),
            title: title.into(),
            format,
            duration_minutes: minutes,
            difficulty: Difficulty::Beginner,
            similarity_score: score,
            similarity_reason: reason.into(),
            why_similar: why.into(),
        };

        let mut items = vec![
            similar(
                "V789",
                "Data Analytics with Excel",
                ContentFormat::Video,
                18,
                0.88,
                "Same topic (data analytics), different tool focus (Excel vs general)",
                "Covers similar concepts but with a practical Excel approach",
            ),
            similar(
                "A234",
                "Introduction to Business Analytics",
                ContentFormat::Article,
                12,
                0.82,
                "Related field with overlapping concepts",
                "Business analytics builds on data analytics fundamentals",
            ),
            similar(
                "V567",
                "Data Visualization Fundamentals",
                ContentFormat::Video,
                20,
                0.79,
                "Natural next step after data analytics basics",
                "Focuses on one aspect (visualization) covered in the original content",
            ),
        ];
        items.truncate(count);
        Ok(items)
    }

    async fn record_chat_interaction(&self, chat: NewChatInteraction) -> Result<Acknowledgement> {
        let entry = ChatLogEntry {
            interaction_id: fresh_id("chat"),
            response_length: chat.response.chars().count(),
            question_length: chat.question.chars().count(),
            user_id: chat.user_id,
            question: chat.question,
            response: chat.response,
            satisfaction_inferred: chat.satisfaction_inferred,
            timestamp: utc_timestamp(),
            interaction_type: "pedagogical_qa".into(),
        };

        info!(
            target: "edflex::store",
            interaction_id = %entry.interaction_id,
            user_id = %entry.user_id,
            satisfaction = ?entry.satisfaction_inferred,
            question_length = entry.question_length,
            response_length = entry.response_length,
            "chatbot interaction logged"
        );

        Ok(Acknowledgement {
            status: "logged".into(),
            message: format!("Logged chatbot interaction for {}", entry.user_id),
            interaction_id: Some(entry.interaction_id),
            notification_id: None,
        })
    }

    async fn user_progress(&self, user_id: &str) -> Result<UserProgress> {
        Ok(UserProgress {
            user_id: user_id.into(),
            last_updated: utc_timestamp(),
            active_learning_paths: vec![ActivePath {
                path_id: "path_001".into(),
                path_name: "Data Analytics Fundamentals".into(),
                skill_target: "Data Analytics".into(),
                progress_percent: 65,
                items_completed: 8,
                items_total: 12,
                started_at: "2025-09-15".into(),
                estimated_completion: "2025-10-25".into(),
                next_item: ContentRef {
                    content_id: "V999".into(),
                    title: "Advanced Data Cleaning".into(),
                },
            }],
            recent_completions: vec![
                Completion {
                    content_id: "V456".into(),
                    title: "Introduction to Data Analytics".into(),
                    completed_at: "2025-10-05T18:20:00Z".into(),
                    quiz_score: 92,
                },
                Completion {
                    content_id: "A123".into(),
                    title: "Excel for Data Analysis".into(),
                    completed_at: "2025-10-04T19:15:00Z".into(),
                    quiz_score: 88,
                },
            ],
            achievements: vec![Achievement {
                achievement_id: "cert_001".into(),
                kind: "certification".into(),
                name: "HubSpot Content Marketing Certification".into(),
                earned_at: "2025-09-01".into(),
                badge_url: "https://edflex.com/badges/cert_001".into(),
            }],
            certifications_in_progress: vec![CertificationProgress {
                certification_id: "cert_002".into(),
                name: "Google Analytics Certification".into(),
                progress_percent: 75,
                items_completed: 9,
                items_total: 12,
            }],
            current_streak_days: 7,
            longest_streak_days: 14,
            total_content_completed: 61,
            total_hours_learning: 42.5,
            member_since: "2025-08-15".into(),
            upcoming_milestones: vec![Milestone {
                milestone: "Complete Data Analytics path".into(),
                progress_percent: 65,
                items_remaining: 4,
                estimated_date: "2025-10-25".into(),
            }],
        })
    }

    async fn send_notification(&self, notification: NewNotification) -> Result<Acknowledgement> {
        let sent = Notification {
            notification_id: fresh_id("notif"),
            user_id: notification.user_id,
            message: notification.message,
            notification_type: notification.notification_type,
            sent_at: utc_timestamp(),
            channels: strings(&["push", "in_app"]),
            priority: "normal".into(),
        };

        info!(
            target: "edflex::store",
            notification_id = %sent.notification_id,
            user_id = %sent.user_id,
            notification_type = %sent.notification_type,
            channels = ?sent.channels,
            "encouragement notification sent"
        );

        Ok(Acknowledgement {
            status: "sent".into(),
            message: format!(
                "Sent {} notification to {}",
                sent.notification_type, sent.user_id
            ),
            interaction_id: None,
            notification_id: Some(sent.notification_id),
        })
    }

    async fn troubleshooting(&self, issue_description: &str) -> Result<TroubleshootingAnswer> {
        let issue = issue_description.to_lowercase();

        if issue.contains("video") || issue.contains("play") || issue.contains("buffer") {
            return Ok(troubleshooting_entry(
                "Video buffering or won't play",
                &[
                    "Lower video quality: Click gear icon → Select 480p instead of 1080p",
                    "Clear browser cache: Settings → Privacy → Clear browsing data",
                    "Try a different browser (Chrome, Firefox, Safari)",
                    "Check internet connection speed (minimum 5 Mbps recommended)",
                    "Disable browser extensions that might block content",
                ],
                "5 minutes",
            ));
        }
        if issue.contains("download") {
            return Ok(troubleshooting_entry(
                "Cannot download content",
                &[
                    "Check if content allows downloads (some publishers restrict this)",
                    "Verify you have enough storage space on your device",
                    "Try downloading in a different format (PDF vs video)",
                    "Clear download queue and try again",
                ],
                "3 minutes",
            ));
        }
        if issue.contains("certificate") {
            return Ok(troubleshooting_entry(
                "Cannot generate certificate",
                &[
                    "Ensure you've completed 100% of the course",
                    "Check that all quizzes/assessments are passed (minimum 80%)",
                    "Wait 24 hours after completion for certificate generation",
                    "Go to Profile → Certificates → Download",
                ],
                "24 hours",
            ));
        }

        Ok(TroubleshootingAnswer {
            issue: issue_description.into(),
            solution_found: false,
            solution_steps: vec![],
            estimated_resolution_time: None,
            escalate_if_unresolved: None,
            message: Some(
                "I couldn't find a specific solution for this issue. Let me connect you with our support team."
                    .into(),
            ),
            escalate_to_support: Some(true),
            support_contact: Some(SUPPORT_CONTACT.into()),
        })
    }

    async fn learner_context(&self, user_id: &str) -> Result<LearnerContext> {
        Ok(LearnerContext {
            user_id: user_id.into(),
            name: "Alice".into(),
            job_role: "Marketing Manager".into(),
            current_learning_path: "Data Analytics Fundamentals".into(),
            current_path_progress: 65,
            recent_activity: "Completed 'Introduction to Data Analytics' 2 hours ago".into(),
            last_active: "2025-10-06T14:30:00Z".into(),
            preferences: ContextPreferences {
                format: ContentFormat::Video,
                language: "English".into(),
                difficulty: Difficulty::Intermediate,
            },
            engagement_level: "engaged".into(),
            typical_session_time: "18:00-20:00".into(),
            learning_pace: "moderate".into(),
            courses_completed_this_month: 5,
            current_streak_days: 7,
            member_since: "2025-08-15".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SampleLearningStore {
        SampleLearningStore::new()
    }

    #[tokio::test]
    async fn test_record_interaction_is_stable_for_same_event() {
        let interaction = NewInteraction {
            user_id: "User123".into(),
            content_id: "V456".into(),
            interaction_type: InteractionType::View,
            duration_seconds: 480,
            completion_percentage: 0.8,
            timestamp: "2025-10-06T14:30:00Z".into(),
        };

        let first = store().record_interaction(interaction.clone()).await.unwrap();
        let second = store().record_interaction(interaction).await.unwrap();

        assert_eq!(first.status, "success");
        assert_eq!(first.interaction_id, second.interaction_id);
        assert!(first.interaction_id.starts_with("int_"));
        assert_eq!(
            first.message,
            "Tracked view interaction for user User123 on content V456"
        );
    }

    #[tokio::test]
    async fn test_behavior_history_is_most_recent_first() {
        let history = store().behavior_history("u1", 30).await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|e| e.user_id == "u1"));
        assert!(history.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[tokio::test]
    async fn test_engagement_metrics_report_recorded_and_threshold_tiers() {
        let metrics = store().engagement_metrics("u1", 7).await.unwrap();
        assert_eq!(metrics.period_days, 7);
        assert!(metrics.period_start < metrics.period_end);
        assert_eq!(metrics.engagement_tier, EngagementTier::Engaged);
        // 4.2 sessions/week at 68 % misses the engaged band (>4 and >70 %)
        assert_eq!(
            metrics.threshold_tier,
            EngagementTier::classify(metrics.sessions_per_week, metrics.completion_rate_percent)
        );
        assert_eq!(metrics.threshold_tier, EngagementTier::Casual);
        assert_eq!(metrics.risk_of_churn, Level::Low);
    }

    #[tokio::test]
    async fn test_engagement_window_overflow_is_invalid_input() {
        let err = store().engagement_metrics("u1", u32::MAX).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_learning_path_templates_and_truncation() {
        let path = store().learning_path("Rust", "u1", 20).await.unwrap();
        assert_eq!(path.phases.len(), 2);
        assert_eq!(path.phases[0].content_items[0].title, "Rust Basics");
        assert_eq!(path.phases[0].checkpoint, "Quiz: Foundations of Rust");
        assert_eq!(path.certification_available, "Rust Certification");
        assert_eq!(path.estimated_completion_date.len(), 10);
        assert_eq!(path.total_content_items, 12);
        assert_eq!(path.estimated_total_duration_hours, 24);

        // Whole phases kept: totals follow the remaining phases
        let short = store().learning_path("Rust", "u1", 2).await.unwrap();
        assert_eq!(short.item_count(), 2);
        assert_eq!(short.phases.len(), 1);
        assert_eq!(short.total_content_items, 2);
        assert_eq!(short.estimated_total_duration_hours, 8);

        // A cut phase is re-estimated from its remaining 20 minute video
        let single = store().learning_path("Rust", "u1", 1).await.unwrap();
        assert_eq!(single.total_content_items, 1);
        assert_eq!(single.phases[0].phase_duration_hours, 1);
        assert_eq!(single.estimated_total_duration_hours, 1);
    }

    #[tokio::test]
    async fn test_next_best_content_respects_count() {
        assert_eq!(store().next_best_content("u1", 5).await.unwrap().len(), 2);
        let one = store().next_best_content("u1", 1).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].content_id, "V456");
        assert!(store().next_best_content("u1", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_similar_content_respects_count() {
        assert_eq!(store().similar_content("V456", 5).await.unwrap().len(), 3);
        assert_eq!(store().similar_content("V456", 2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_content_metadata_url() {
        let meta = store().content_metadata("X1").await.unwrap();
        assert_eq!(meta.url, "https://edflex.com/content/X1");
    }

    #[tokio::test]
    async fn test_troubleshooting_keyword_matching() {
        let answer = store().troubleshooting("The VIDEO keeps buffering").await.unwrap();
        assert!(answer.solution_found);
        assert_eq!(answer.issue, "Video buffering or won't play");

        let answer = store().troubleshooting("download fails").await.unwrap();
        assert_eq!(answer.issue, "Cannot download content");

        let answer = store().troubleshooting("where is my certificate").await.unwrap();
        assert_eq!(answer.estimated_resolution_time.as_deref(), Some("24 hours"));

        let answer = store().troubleshooting("cannot log in").await.unwrap();
        assert!(!answer.solution_found);
        assert_eq!(answer.escalate_to_support, Some(true));
        assert_eq!(answer.support_contact.as_deref(), Some("support@edflex.com"));
        assert_eq!(answer.issue, "cannot log in");
    }

    #[tokio::test]
    async fn test_write_acknowledgements() {
        let ack = store()
            .send_notification(NewNotification {
                user_id: "u1".into(),
                message: "Well done".into(),
                notification_type: crate::types::assistant::NotificationType::Milestone,
            })
            .await
            .unwrap();
        assert_eq!(ack.status, "sent");
        assert_eq!(ack.message, "Sent milestone notification to u1");
        assert!(ack.notification_id.unwrap().starts_with("notif_"));

        let logged = store()
            .record_recommendation(NewRecommendation {
                user_id: "u1".into(),
                content_id: "V456".into(),
                recommendation_reason: "skill_gap".into(),
                context: serde_json::json!({"goal": "analytics"}),
            })
            .await
            .unwrap();
        assert_eq!(logged.status, "logged");
        assert_eq!(logged.message, "Logged recommendation of V456 to u1");
    }
}
