//! User prompts sent to each agent for an API action.

pub const DEFAULT_PROFILER_ACTION: &str = "analyze_behavior";
pub const DEFAULT_RECOMMENDER_ACTION: &str = "recommend_content";

/// Prompt for the Learner Profiler. Unknown actions fall back to a general
/// profile analysis.
pub fn profiler_prompt(action: &str, user_id: &str) -> String {
    match action {
        "analyze_behavior" => {
            format!("Analyser le comportement d'apprentissage pour user_id: {user_id}")
        }
        "identify_learning_style" => {
            format!("Identifier le style d'apprentissage pour user_id: {user_id}")
        }
        "detect_skill_gaps" => {
            format!("Détecter les lacunes de compétences pour user_id: {user_id}")
        }
        "calculate_engagement" => {
            format!("Calculer les métriques d'engagement pour user_id: {user_id}")
        }
        "get_full_profile" => format!("Récupérer le profil complet pour user_id: {user_id}"),
        _ => format!("Analyser le profil pour user_id: {user_id}"),
    }
}

/// Prompt for the Path Recommender. `goal` only matters for `build_learning_path`.
pub fn recommender_prompt(action: &str, user_id: &str, goal: Option<&str>) -> String {
    match action {
        "recommend_content" => {
            format!("Recommander du contenu personnalisé pour user_id: {user_id}")
        }
        "build_learning_path" => match goal.filter(|g| !g.is_empty()) {
            Some(goal) => format!(
                "Construire un parcours d'apprentissage pour user_id: {user_id} avec l'objectif: {goal}"
            ),
            None => format!("Construire un parcours d'apprentissage pour user_id: {user_id}"),
        },
        "get_next_content" => {
            format!("Recommander le prochain meilleur contenu pour user_id: {user_id}")
        }
        "check_prerequisites" => format!("Vérifier les prérequis pour user_id: {user_id}"),
        _ => format!("Recommander du contenu pour user_id: {user_id}"),
    }
}

pub fn assistant_prompt(user_id: &str, question: &str) -> String {
    format!("User {user_id} demande: {question}")
}
