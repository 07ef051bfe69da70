//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use toolhub_core::catalog::ToolCategory;

/// Default config path: .config/toolhub.toml (relative to current working directory)
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("toolhub.toml")
}

#[derive(Parser)]
#[command(name = "toolhub")]
#[command(about = "toolhub - document and image tools (simulated processing)")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (defaults to .config/toolhub.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Log one level more verbosely than the config asks for
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available tools
    List {
        /// Only show one category (pdf, image, document)
        #[arg(short, long, value_parser = parse_category)]
        category: Option<ToolCategory>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a tool's details
    Show {
        /// Tool id, e.g. merge-pdf
        tool: String,
    },

    /// Run a tool on files
    Run(RunArgs),

    /// Config file management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Tool id, e.g. pdf-to-word
    pub tool: String,

    /// Input files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Advance progress in fixed steps instead of random ones
    #[arg(long)]
    pub fixed: bool,

    /// Seed for random progress
    #[arg(long)]
    pub seed: Option<u64>,

    /// Download every processed file afterwards
    #[arg(short, long)]
    pub download: bool,

    /// Print the final session state as JSON instead of live output
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Write the config file with defaults (keeps existing values)
    Init,
    /// Print the effective configuration
    Show,
}

fn parse_category(name: &str) -> Result<ToolCategory, String> {
    ToolCategory::from_name(name)
        .ok_or_else(|| format!("unknown category '{}' (expected pdf, image or document)", name))
}
