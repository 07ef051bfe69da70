//! ToolHub - terminal entry point
//!
//! Handles configuration loading, logging initialization and dispatch to
//! the subcommands.

use anyhow::Result;
use clap::Parser;

use toolhub_core::config::{ConfigError, ConfigManager};
use toolhub_core::logging::{init_tracing, init_tracing_with_file};

mod cli;
mod commands;
mod view;

use cli::{default_config_path, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging settings)
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config_manager = ConfigManager::new(&config_path);
    let load_result = config_manager.load();

    let logging = &config_manager.settings().logging;
    let level = if cli.verbose {
        logging.level.more_verbose()
    } else {
        logging.level
    };

    let _log_guard = if logging.log_to_file {
        match init_tracing_with_file(level, &config_manager.logs_folder()) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: Failed to open log file: {}. Logging to stderr only.", e);
                init_tracing(level);
                None
            }
        }
    } else {
        init_tracing(level);
        None
    };

    match load_result {
        Ok(()) => tracing::debug!("Config: {}", config_path.display()),
        Err(ConfigError::NotFound(_)) => {
            tracing::debug!("No config at {}, using defaults", config_path.display())
        }
        Err(e) => eprintln!("Warning: Failed to load config: {}. Using defaults.", e),
    }
    tracing::debug!("Core version: {}", toolhub_core::version());

    match cli.command {
        Commands::List { category, json } => commands::list(category, json),
        Commands::Show { tool } => commands::show(&tool),
        Commands::Run(args) => commands::run(&config_manager, args).await,
        Commands::Config(command) => commands::config(&mut config_manager, command),
    }
}
