use anyhow::Context;
use edflex::{
    AgentKind, AppState, ConfigManager, EdflexConfig,
    api::routes::create_app,
    cli::{AgentCommands, Cli, Commands, output::Output},
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let config = load_config(&cli.config)?;

    match cli.command {
        None => serve(cli.config.as_path(), config, cli.verbose, &output).await,
        Some(Commands::Config { validate }) => show_config(&cli.config, &config, validate, &output),
        Some(Commands::Agent(command)) => agent_command(command, config, &output),
    }
}

/// The configuration file when present, the stock deployment otherwise.
fn load_config(path: &Path) -> anyhow::Result<EdflexConfig> {
    if path.exists() {
        EdflexConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))
    } else {
        Ok(EdflexConfig::default())
    }
}

fn init_tracing(log_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_timer(ChronoLocal::rfc_3339()))
        .init();
}

async fn serve(
    path: &Path,
    config: EdflexConfig,
    verbose: bool,
    output: &Output,
) -> anyhow::Result<()> {
    init_tracing(&config.server.log_level, verbose);

    for warning in config.validate_with_warnings()? {
        warn!("{}", warning);
    }

    let config_manager = if path.exists() {
        let mut manager = ConfigManager::new(path)?;
        manager.start_watching()?;
        manager
    } else {
        warn!(
            path = %path.display(),
            "Configuration file not found, using the stock configuration"
        );
        ConfigManager::from_config(config.clone())
    };

    let state = AppState::new(Arc::new(config_manager));
    let app = create_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    output.banner();
    output.header("Endpoints");
    output.endpoint("POST", "/api/profiler", "Learner Profiler");
    output.endpoint("POST", "/api/recommender", "Path Recommender");
    output.endpoint("POST", "/api/assistant", "Learning Assistant");
    output.endpoint("GET", "/api/assistant/conversations/{id}", "Conversation turns");
    output.endpoint("DELETE", "/api/assistant/conversations/{id}", "Delete a conversation");
    output.endpoint("GET", "/api/agents", "Agents, models and tools");
    output.endpoint("GET", "/health", "Health check");
    #[cfg(feature = "swagger-ui")]
    output.endpoint("GET", "/swagger-ui/", "Interactive API documentation");
    output.newline();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn show_config(
    path: &Path,
    config: &EdflexConfig,
    validate: bool,
    output: &Output,
) -> anyhow::Result<()> {
    output.header("Configuration");
    if path.exists() {
        output.kv("File", &path.display().to_string());
    } else {
        output.kv("File", "none (stock configuration)");
    }
    output.kv(
        "Server",
        &format!("{}:{}", config.server.host, config.server.port),
    );
    output.kv("Log level", &config.server.log_level);
    output.kv("Default model", config.default_model_name().unwrap_or("none"));

    output.header("Models");
    let mut models: Vec<_> = config.models.iter().collect();
    models.sort_by_key(|(name, _)| name.as_str());
    for (name, model) in models {
        output.list_item(&format!("{} -> {} ({})", name, model.model, model.provider));
    }

    if validate {
        output.header("Validation");
        match config.validate_with_warnings() {
            Ok(warnings) if warnings.is_empty() => output.success("Configuration is valid"),
            Ok(warnings) => {
                output.success("Configuration is valid");
                for warning in warnings {
                    output.warning(&warning.to_string());
                }
            }
            Err(e) => {
                output.error(&e.to_string());
                anyhow::bail!("configuration is invalid");
            }
        }
    }

    output.newline();
    Ok(())
}

fn agent_command(
    command: AgentCommands,
    config: EdflexConfig,
    output: &Output,
) -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(ConfigManager::from_config(config)));

    match command {
        AgentCommands::List => {
            output.header("Agents");
            output.table_header(&["Key", "Name", "Model", "Tools"]);
            for summary in state.agent_registry.summaries() {
                output.table_row(&[
                    &summary.key,
                    &summary.name,
                    &summary.model,
                    &summary.tools.len().to_string(),
                ]);
            }
        }
        AgentCommands::Show { name } => {
            let Some(kind) = AgentKind::from_key(&name) else {
                output.error(&format!("Unknown agent '{}'", name));
                anyhow::bail!(
                    "unknown agent '{}', expected one of: {}",
                    name,
                    state.agent_registry.agent_names().join(", ")
                );
            };

            let definition = state.agent_registry.definition(kind);
            let agent_config = state.config_manager.config().agent_config(kind);

            output.header(definition.name);
            output.kv("Id", definition.id);
            output.kv("Role", definition.role);
            output.kv("Model", &agent_config.model);
            output.kv(
                "Max tool iterations",
                &agent_config.max_tool_iterations.to_string(),
            );
            output.kv("Parallel tools", &agent_config.parallel_tools.to_string());

            output.header("Tools");
            for tool in state.config_manager.config().agent_tools(kind) {
                output.list_item(&tool);
            }
        }
    }

    output.newline();
    Ok(())
}
