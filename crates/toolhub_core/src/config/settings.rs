//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::progress::{ProgressMode, ProgressTiming};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Timer settings for simulated work.
    #[serde(default)]
    pub timing: TimingSettings,

    /// How progress advances.
    #[serde(default)]
    pub progress: ProgressSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Clamp out-of-range values back into range.
    ///
    /// Returns a description of every correction made.
    pub fn validate(&mut self) -> Vec<String> {
        let mut corrections = Vec::new();

        if self.timing.tick_ms == 0 {
            self.timing.tick_ms = 1;
            corrections.push("timing.tick_ms must be at least 1, using 1".to_string());
        }

        if self.progress.max_ticks == 0 {
            self.progress.max_ticks = default_max_ticks();
            corrections.push(format!(
                "progress.max_ticks must be at least 1, using {}",
                self.progress.max_ticks
            ));
        }

        if !self.progress.max_step.is_finite() || self.progress.max_step <= 0.0 {
            self.progress.max_step = default_max_step();
            corrections.push(format!(
                "progress.max_step must be positive, using {}",
                self.progress.max_step
            ));
        }

        if !self.progress.fixed_step.is_finite() || self.progress.fixed_step <= 0.0 {
            self.progress.fixed_step = default_fixed_step();
            corrections.push(format!(
                "progress.fixed_step must be positive, using {}",
                self.progress.fixed_step
            ));
        }

        corrections
    }
}

/// Timer settings, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Interval between progress ticks.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Delay between reaching 100% and completion.
    #[serde(default = "default_completion_delay_ms")]
    pub completion_delay_ms: u64,

    /// Delay between "Downloading..." and "Download started!".
    #[serde(default = "default_download_delay_ms")]
    pub download_delay_ms: u64,
}

fn default_tick_ms() -> u64 {
    200
}

fn default_completion_delay_ms() -> u64 {
    500
}

fn default_download_delay_ms() -> u64 {
    1000
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            completion_delay_ms: default_completion_delay_ms(),
            download_delay_ms: default_download_delay_ms(),
        }
    }
}

impl TimingSettings {
    /// Timer settings for a progress task.
    pub fn progress_timing(&self) -> ProgressTiming {
        ProgressTiming {
            tick: Duration::from_millis(self.tick_ms),
            settle: Duration::from_millis(self.completion_delay_ms),
        }
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }
}

/// Progress increment style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressModeSetting {
    /// Random increment in `[0, max_step)`.
    #[default]
    Random,
    /// Constant `fixed_step` increment.
    Fixed,
}

/// Progress sequence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSettings {
    #[serde(default)]
    pub mode: ProgressModeSetting,

    /// Upper bound (exclusive) of a random increment.
    #[serde(default = "default_max_step")]
    pub max_step: f64,

    /// Increment used in fixed mode.
    #[serde(default = "default_fixed_step")]
    pub fixed_step: f64,

    /// Ticks after which a run is forced to 100%.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u32,
}

fn default_max_step() -> f64 {
    20.0
}

fn default_fixed_step() -> f64 {
    10.0
}

fn default_max_ticks() -> u32 {
    15
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            mode: ProgressModeSetting::default(),
            max_step: default_max_step(),
            fixed_step: default_fixed_step(),
            max_ticks: default_max_ticks(),
        }
    }
}

impl ProgressSettings {
    /// The configured increment style.
    pub fn to_mode(&self) -> ProgressMode {
        match self.mode {
            ProgressModeSetting::Random => ProgressMode::Random {
                max_step: self.max_step,
            },
            ProgressModeSetting::Fixed => ProgressMode::Fixed {
                step: self.fixed_step,
            },
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Also write logs to a file in `logs_folder`.
    #[serde(default)]
    pub log_to_file: bool,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            log_to_file: false,
            logs_folder: default_logs_folder(),
        }
    }
}

/// Config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Timing,
    Progress,
    Logging,
}

impl ConfigSection {
    /// All sections in file order.
    pub const ALL: [ConfigSection; 3] = [Self::Timing, Self::Progress, Self::Logging];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Timing => "timing",
            ConfigSection::Progress => "progress",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Timing => "Timer settings for simulated processing (milliseconds)",
            ConfigSection::Progress => "Progress increments: mode = \"random\" or \"fixed\"",
            ConfigSection::Logging => "Logging configuration",
        }
    }

    /// Look up a section by table name.
    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.table_name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[timing]"));
        assert!(toml.contains("[progress]"));
        assert!(toml.contains("mode = \"random\""));
        assert!(toml.contains("level = \"info\""));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[progress]\nmode = \"fixed\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert_eq!(parsed.progress.mode, ProgressModeSetting::Fixed);
        assert_eq!(parsed.progress.fixed_step, 10.0);
        assert_eq!(parsed.timing.tick_ms, 200);
        assert_eq!(parsed.logging.logs_folder, ".logs");
    }

    #[test]
    fn progress_mode_follows_setting() {
        let mut progress = ProgressSettings::default();
        assert_eq!(progress.to_mode(), ProgressMode::Random { max_step: 20.0 });

        progress.mode = ProgressModeSetting::Fixed;
        assert_eq!(progress.to_mode(), ProgressMode::Fixed { step: 10.0 });
    }

    #[test]
    fn validate_clamps_bad_values() {
        let mut settings = Settings::default();
        settings.timing.tick_ms = 0;
        settings.progress.max_step = -1.0;
        settings.progress.max_ticks = 0;

        let corrections = settings.validate();
        assert_eq!(corrections.len(), 3);
        assert_eq!(settings.timing.tick_ms, 1);
        assert_eq!(settings.progress.max_step, 20.0);
        assert_eq!(settings.progress.max_ticks, 15);

        assert!(settings.validate().is_empty());
    }

    #[test]
    fn timing_converts_to_durations() {
        let timing = TimingSettings::default();
        let progress = timing.progress_timing();
        assert_eq!(progress.tick, Duration::from_millis(200));
        assert_eq!(progress.settle, Duration::from_millis(500));
        assert_eq!(timing.download_delay(), Duration::from_secs(1));
    }
}
