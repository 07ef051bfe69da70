//! Session state, events and snapshots.

use std::time::Duration;

use serde::Serialize;

use crate::config::Settings;
use crate::models::{FileId, SelectedFile, StatusMessage};
use crate::progress::{ProgressMode, ProgressTiming, RunId};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionPhase {
    /// No files selected.
    Idle,
    /// Files selected, not yet processed.
    FilesSelected,
    /// A run is animating.
    Processing { run: RunId },
    /// The run finished; downloads are offered.
    Completed { run: RunId },
}

impl SessionPhase {
    /// Get display string for UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::FilesSelected => "Files selected",
            Self::Processing { .. } => "Processing",
            Self::Completed { .. } => "Completed",
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Change published to session observers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A tool was selected; files, progress and message were cleared.
    ToolSelected { tool_id: String, title: String },
    /// The session went back to its initial state (navigate home).
    Reset,
    /// The file list was replaced or shrank.
    FilesChanged { count: usize },
    /// A run started at 0%.
    RunStarted { run: RunId },
    /// Progress of a run moved forward.
    Progress { run: RunId, percent: f64 },
    /// A run reached 100% and settled.
    RunCompleted { run: RunId },
    /// A run was stopped before completing.
    RunCancelled { run: RunId },
    /// The status message changed.
    Message(StatusMessage),
    /// The status message was removed.
    MessageCleared,
    /// A (simulated) download was handed off.
    DownloadStarted { file_id: FileId, output_name: String },
}

/// Observer callback receiving every session event.
pub type SessionObserver = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunId),
    Cancelled(RunId),
}

/// Session behavior settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Progress increment style.
    pub mode: ProgressMode,
    /// Ticks after which a run is forced to 100%.
    pub max_ticks: u32,
    /// Tick interval and settle delay.
    pub timing: ProgressTiming,
    /// Delay between the two download messages.
    pub download_delay: Duration,
    /// Fixed seed for random progress (reproducible runs).
    pub seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            mode: ProgressMode::default(),
            max_ticks: 15,
            timing: ProgressTiming::default(),
            download_delay: Duration::from_millis(1000),
            seed: None,
        }
    }
}

impl From<&Settings> for SessionSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            mode: settings.progress.to_mode(),
            max_ticks: settings.progress.max_ticks,
            timing: settings.timing.progress_timing(),
            download_delay: settings.timing.download_delay(),
            seed: None,
        }
    }
}

/// A file offered for download after completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadTarget {
    pub file_id: FileId,
    pub original_name: String,
    pub output_name: String,
}

/// A download whose "started" message is still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDownload {
    pub file_id: FileId,
    pub output_name: String,
}

/// File entry in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    pub display_size: String,
}

impl From<&SelectedFile> for FileSummary {
    fn from(file: &SelectedFile) -> Self {
        Self {
            id: file.id,
            name: file.name().to_string(),
            size: file.size(),
            display_size: file.display_size(),
        }
    }
}

/// Plain-data view of a session for rendering or serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub tool_id: Option<String>,
    pub title: Option<String>,
    pub accept: Option<String>,
    pub multiple: Option<bool>,
    pub phase: SessionPhase,
    pub files: Vec<FileSummary>,
    pub progress: f64,
    pub message: Option<StatusMessage>,
    pub downloads: Vec<DownloadTarget>,
}
