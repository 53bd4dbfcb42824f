//! Static agent definitions and system prompt composition
//!
//! Each agent's description, instructions and expected output live under
//! `prompts/<agent_key>/` and are compiled into the binary.

use crate::types::AgentKind;

/// Tools the stock configuration gives each agent.
pub fn default_tools(kind: AgentKind) -> &'static [&'static str] {
    match kind {
        AgentKind::LearnerProfiler => &[
            "think",
            "analyze",
            "calculator",
            "track_content_interaction",
            "get_learner_behavior_history",
            "calculate_learning_style_score",
            "identify_skill_gaps",
            "get_engagement_metrics",
            "get_learner_profile_from_db",
        ],
        AgentKind::PathRecommender => &[
            "think",
            "analyze",
            "calculator",
            "get_learner_profile",
            "search_content_catalog",
            "calculate_content_relevance_score",
            "build_learning_path",
            "get_next_best_content",
            "log_recommendation",
            "check_prerequisite_completion",
            "get_content_metadata",
        ],
        AgentKind::LearningAssistant => &[
            "think",
            "analyze",
            "search_exa",
            "search_edflex_knowledge_base",
            "get_content_summary",
            "search_similar_content",
            "log_chatbot_interaction",
            "get_user_progress",
            "send_encouragement_notification",
            "explain_concept",
            "get_troubleshooting_help",
            "get_learner_context",
        ],
    }
}

const REASONING_INSTRUCTIONS: &str = "\
You have access to the `think` and `analyze` tools. Use them as a scratchpad:
- Before acting, call `think` to break the request down, note what you already know and plan which tools to call.
- After each tool result, call `analyze` to judge whether the result answers the question and set `next_action` to `continue`, `validate` or `final_answer`.
- Keep each step short and concrete, and state your confidence honestly.
- Only answer the user once `analyze` has concluded with `final_answer`.";

const MARKDOWN_INSTRUCTION: &str = "Use markdown to format your answers.";

/// Identity and prompt material of one agent.
#[derive(Debug, Clone, Copy)]
pub struct AgentDefinition {
    pub kind: AgentKind,
    pub id: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub description: &'static str,
    pub instructions: &'static str,
    pub expected_output: &'static str,
}

impl AgentDefinition {
    pub fn for_kind(kind: AgentKind) -> Self {
        match kind {
            AgentKind::LearnerProfiler => Self {
                kind,
                id: kind.agent_id(),
                name: kind.display_name(),
                role: "Analyze learner behavior and build comprehensive learner profiles.",
                description: include_str!("../../prompts/learner_profiler/description.md"),
                instructions: include_str!("../../prompts/learner_profiler/instructions.md"),
                expected_output: include_str!(
                    "../../prompts/learner_profiler/expected_output.md"
                ),
            },
            AgentKind::PathRecommender => Self {
                kind,
                id: kind.agent_id(),
                name: kind.display_name(),
                role: "Generate personalized learning paths and content recommendations.",
                description: include_str!("../../prompts/path_recommender/description.md"),
                instructions: include_str!("../../prompts/path_recommender/instructions.md"),
                expected_output: include_str!(
                    "../../prompts/path_recommender/expected_output.md"
                ),
            },
            AgentKind::LearningAssistant => Self {
                kind,
                id: kind.agent_id(),
                name: kind.display_name(),
                role: "Provide real-time conversational support and guidance to learners.",
                description: include_str!("../../prompts/learning_assistant/description.md"),
                instructions: include_str!("../../prompts/learning_assistant/instructions.md"),
                expected_output: include_str!(
                    "../../prompts/learning_assistant/expected_output.md"
                ),
            },
        }
    }

    /// Compose the system prompt for an agent allowed to call `tools`.
    ///
    /// Reasoning instructions are included only when `think` or `analyze`
    /// is among the tools.
    pub fn system_prompt(&self, tools: &[String], markdown: bool) -> String {
        let mut prompt = String::new();
        prompt.push_str(self.description.trim());
        prompt.push_str("\n\n<your_role>\n");
        prompt.push_str(self.role);
        prompt.push_str("\n</your_role>\n\n<instructions>\n");
        prompt.push_str(self.instructions.trim());

        if tools.iter().any(|t| t == "think" || t == "analyze") {
            prompt.push_str("\n\n");
            prompt.push_str(REASONING_INSTRUCTIONS);
        }
        prompt.push_str("\n</instructions>\n\n");

        if markdown {
            prompt.push_str("<additional_information>\n- ");
            prompt.push_str(MARKDOWN_INSTRUCTION);
            prompt.push_str("\n</additional_information>\n\n");
        }

        prompt.push_str("<expected_output>\n");
        prompt.push_str(self.expected_output.trim());
        prompt.push_str("\n</expected_output>");
        prompt
    }
}
