//! Subcommand implementations.

use anyhow::{Context, Result};

use toolhub_core::catalog::{self, ToolCategory};
use toolhub_core::config::ConfigManager;
use toolhub_core::models::FileHandle;
use toolhub_core::progress::ProgressMode;
use toolhub_core::session::{RunOutcome, SessionSettings, ToolSession};

use crate::cli::{ConfigCommands, RunArgs};
use crate::view;

pub fn list(category: Option<ToolCategory>, json: bool) -> Result<()> {
    let categories: Vec<ToolCategory> = match category {
        Some(category) => vec![category],
        None => ToolCategory::ALL.to_vec(),
    };

    if json {
        let tools: Vec<_> = categories
            .iter()
            .flat_map(|c| catalog::by_category(*c))
            .collect();
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    for category in categories {
        println!("{}", category);
        for tool in catalog::by_category(category) {
            println!("  {:<16} {}", tool.id, tool.title);
        }
        println!();
    }
    Ok(())
}

pub fn show(tool_id: &str) -> Result<()> {
    let tool = catalog::resolve(tool_id);
    if tool.is_fallback() {
        println!("Unknown tool '{}', showing the generic tool", tool_id);
    }

    println!("{}", tool.title);
    println!("  {}", tool.description);
    println!("  Accepts:  {}", tool.accept);
    println!(
        "  Files:    {}",
        if tool.multiple { "multiple" } else { "single" }
    );
    if let Some(category) = tool.category {
        println!("  Category: {}", category);
    }
    if let Some(ext) = tool.output_extension {
        println!("  Output:   .{}", ext);
    }
    Ok(())
}

/// Session settings from config plus command-line overrides.
pub fn session_settings(config: &ConfigManager, args: &RunArgs) -> SessionSettings {
    let mut settings = SessionSettings::from(config.settings());
    if args.fixed {
        settings.mode = ProgressMode::Fixed {
            step: config.settings().progress.fixed_step,
        };
    }
    settings.seed = args.seed;
    settings
}

pub async fn run(config: &ConfigManager, args: RunArgs) -> Result<()> {
    let handles = args
        .files
        .iter()
        .map(|path| {
            FileHandle::from_path(path).with_context(|| format!("Cannot use {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut session = ToolSession::new(session_settings(config, &args));
    if !args.json {
        session.subscribe(view::terminal_observer());
    }

    let tool = session.select_tool(&args.tool);
    for warning in view::file_warnings(tool, &handles) {
        eprintln!("Warning: {}", warning);
    }
    session.add_files(handles)?;

    let finished = tokio::select! {
        outcome = session.process() => Some(outcome?),
        _ = tokio::signal::ctrl_c() => None,
    };
    let outcome = match finished {
        Some(outcome) => outcome,
        None => {
            tracing::info!("Interrupted");
            match session.cancel() {
                Some(run) => RunOutcome::Cancelled(run),
                None => anyhow::bail!("Interrupted before processing started"),
            }
        }
    };

    if matches!(outcome, RunOutcome::Completed(_)) && args.download {
        for target in session.download_targets() {
            session.download(target.file_id).await?;
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    } else if let RunOutcome::Completed(_) = outcome {
        if !args.download {
            for target in session.download_targets() {
                println!("  {} -> {}", target.original_name, target.output_name);
            }
        }
    }

    Ok(())
}

pub fn config(manager: &mut ConfigManager, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Init => {
            manager
                .load_or_create()
                .with_context(|| format!("Cannot initialize {}", manager.path().display()))?;
            println!("Config written to {}", manager.path().display());
        }
        ConfigCommands::Show => {
            println!("# {}", manager.path().display());
            print!("{}", manager.generate_config_with_comments()?);
        }
    }
    Ok(())
}
