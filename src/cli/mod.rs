//! CLI module for the Edflex server
//!
//! Provides command-line interface parsing for the edflex-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Edflex - personalised learning agents
///
/// Serves the Learner Profiler, Path Recommender and Learning Assistant
/// agents over a JSON API.
#[derive(Parser, Debug)]
#[command(
    name = "edflex-server",
    author = "Edflex Engineering <engineering@edflex.com>",
    version,
    about = "Edflex - personalised learning agents",
    long_about = "Serves the Learner Profiler, Path Recommender and Learning Assistant\n\
                  agents over a JSON API, with tool calling over learner and catalog data.\n\n\
                  Run without arguments to start the server.",
    after_help = "EXAMPLES:\n    \
                  edflex-server                        # Start the server (edflex.toml if present)\n    \
                  edflex-server --config prod.toml     # Use a custom config file\n    \
                  edflex-server config --validate      # Check the configuration\n    \
                  edflex-server agent show learning_assistant"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "edflex.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show configuration information
    Config {
        /// Validate the configuration and report warnings
        #[arg(long)]
        validate: bool,
    },

    /// Inspect agents
    #[command(subcommand)]
    Agent(AgentCommands),
}

/// Agent inspection subcommands
#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List the agents with their model and tool count
    List,

    /// Show details for a specific agent
    Show {
        /// Agent key, e.g. learner_profiler
        name: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
