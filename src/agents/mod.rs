//! Learning agents
//!
//! Three agents share one tool registry and one LLM factory:
//!
//! - **Learner Profiler**: analyzes behavior and maintains learner profiles
//! - **Path Recommender**: builds learning paths and picks content
//! - **Learning Assistant**: answers learner questions conversationally
//!
//! Agents are created per request by the [`AgentRegistry`] from the current
//! configuration, then consumed by [`ConfigurableAgent::run`].

pub mod configurable;
pub mod definition;
pub mod prompts;
pub mod registry;

pub use configurable::{AgentRun, ConfigurableAgent};
pub use definition::AgentDefinition;
pub use registry::{AgentRegistry, AgentSummary};
