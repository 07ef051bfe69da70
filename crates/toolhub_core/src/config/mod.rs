//! Configuration management for ToolHub.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use toolhub_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/toolhub.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Tick: {}ms", config.settings().timing.tick_ms);
//!
//! // Modify a setting
//! config.settings_mut().progress.max_ticks = 20;
//!
//! // Save just the progress section atomically
//! config.update_section(ConfigSection::Progress).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, LoggingSettings, ProgressModeSetting, ProgressSettings, Settings,
    TimingSettings,
};
