//! The tool session state machine.

use crate::catalog::{self, ToolDescriptor, DEFAULT_TOOL};
use crate::models::{FileHandle, FileId, SelectedFile, StatusMessage};
use crate::progress::{FakeProgress, ProgressEvent, ProgressHandle, ProgressTask, RunId, COMPLETE};

use tokio::runtime::Handle;

use super::errors::{SessionError, SessionResult};
use super::output::processed_file_name;
use super::types::{
    DownloadTarget, FileSummary, PendingDownload, RunOutcome, SessionEvent, SessionObserver,
    SessionPhase, SessionSettings, SessionSnapshot,
};

pub const MSG_SELECT_FILES_FIRST: &str = "Please select files first.";
pub const MSG_PROCESSING: &str = "Processing files...";
pub const MSG_PROCESSED: &str = "Files processed successfully!";
pub const MSG_CANCELLED: &str = "Processing cancelled.";
pub const MSG_DOWNLOAD_STARTED: &str = "Download started! Check your downloads folder.";

/// State for one tool view.
///
/// Owned by the front-end that renders it; there is no shared or global
/// instance. Dropping the session stops any running progress task.
pub struct ToolSession {
    settings: SessionSettings,
    /// Id as requested, even when it is not in the catalog.
    tool_id: Option<String>,
    tool: Option<&'static ToolDescriptor>,
    files: Vec<SelectedFile>,
    phase: SessionPhase,
    progress: f64,
    message: Option<StatusMessage>,
    task: Option<ProgressTask>,
    last_run: RunId,
    observers: Vec<SessionObserver>,
}

impl ToolSession {
    /// Create an idle session with no tool selected.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            tool_id: None,
            tool: None,
            files: Vec::new(),
            phase: SessionPhase::Idle,
            progress: 0.0,
            message: None,
            task: None,
            last_run: RunId::new(0),
            observers: Vec::new(),
        }
    }

    /// Register an observer for all future events.
    pub fn subscribe(&mut self, observer: SessionObserver) {
        self.observers.push(observer);
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn tool_id(&self) -> Option<&str> {
        self.tool_id.as_deref()
    }

    /// Descriptor of the selected tool (the fallback for unknown ids).
    pub fn tool(&self) -> Option<&'static ToolDescriptor> {
        self.tool
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Progress of the current or last run, in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.phase.is_processing()
    }

    /// Handle to the running progress task, for polling or cancellation
    /// from outside the session's owner.
    pub fn progress_handle(&self) -> Option<ProgressHandle> {
        self.task.as_ref().map(ProgressTask::handle)
    }

    /// Select a tool.
    ///
    /// Clears the file list, the message and the progress. Any running
    /// task is cancelled. Unknown ids get the generic descriptor.
    pub fn select_tool(&mut self, id: &str) -> &'static ToolDescriptor {
        self.abandon_run();

        let tool = catalog::resolve(id);
        tracing::info!("Tool selected: {} ({})", id, tool.title);

        self.tool_id = Some(id.to_string());
        self.tool = Some(tool);
        self.files.clear();
        self.progress = 0.0;
        self.phase = SessionPhase::Idle;
        self.clear_message();

        self.emit(SessionEvent::ToolSelected {
            tool_id: id.to_string(),
            title: tool.title.to_string(),
        });
        tool
    }

    /// Leave the tool view: back to no tool, no files.
    pub fn navigate_home(&mut self) {
        self.abandon_run();

        tracing::debug!("Navigating home, discarding session state");
        self.tool_id = None;
        self.tool = None;
        self.files.clear();
        self.progress = 0.0;
        self.phase = SessionPhase::Idle;
        self.message = None;

        self.emit(SessionEvent::Reset);
    }

    /// Replace the file list with newly picked or dropped files.
    ///
    /// The tool's accept filter and single-file flag are advisory: files
    /// that do not match are logged but kept.
    pub fn add_files(
        &mut self,
        handles: impl IntoIterator<Item = FileHandle>,
    ) -> SessionResult<&[SelectedFile]> {
        self.ensure_not_busy()?;

        self.files = handles.into_iter().map(SelectedFile::new).collect();

        if let Some(tool) = self.tool {
            if !tool.multiple && self.files.len() > 1 {
                tracing::warn!(
                    "{} expects a single file, {} selected",
                    tool.title,
                    self.files.len()
                );
            }
            for file in self.files.iter().filter(|f| !tool.accepts(f.name())) {
                tracing::debug!("{} does not match filter '{}'", file.name(), tool.accept);
            }
        }

        tracing::info!("{} file(s) selected", self.files.len());
        self.clear_message();
        self.after_file_change();
        Ok(&self.files)
    }

    /// Remove a file by id. Unknown ids leave the session untouched.
    pub fn remove_file(&mut self, id: FileId) -> SessionResult<Option<SelectedFile>> {
        self.ensure_not_busy()?;

        let Some(index) = self.files.iter().position(|f| f.id == id) else {
            tracing::debug!("remove_file: no file with id {}", id);
            return Ok(None);
        };

        let removed = self.files.remove(index);
        tracing::info!("Removed {}", removed.name());
        self.after_file_change();
        Ok(Some(removed))
    }

    /// Start a simulated run.
    ///
    /// Fails with [`SessionError::NothingSelected`] (and an error message)
    /// when no tool or no file is selected, and with
    /// [`SessionError::NoRuntime`] outside a Tokio runtime. The phase is
    /// left unchanged on error.
    pub fn run(&mut self) -> SessionResult<RunId> {
        self.ensure_not_busy()?;

        if self.tool.is_none() || self.files.is_empty() {
            tracing::warn!("Run requested without a tool or files");
            self.set_message(StatusMessage::error(MSG_SELECT_FILES_FIRST));
            return Err(SessionError::NothingSelected);
        }

        let runtime = Handle::try_current().map_err(|_| {
            tracing::error!("Run requested outside a Tokio runtime");
            SessionError::NoRuntime
        })?;

        let run = self.last_run.next();
        self.last_run = run;

        let progress = match self.settings.seed {
            Some(seed) => FakeProgress::seeded(self.settings.mode, self.settings.max_ticks, seed),
            None => FakeProgress::new(self.settings.mode, self.settings.max_ticks),
        };

        tracing::info!(
            "Starting {} for {} file(s) with {}",
            run,
            self.files.len(),
            self.tool_id.as_deref().unwrap_or_default()
        );

        self.task = Some(ProgressTask::spawn(&runtime, run, progress, self.settings.timing));
        self.progress = 0.0;
        self.phase = SessionPhase::Processing { run };

        self.emit(SessionEvent::RunStarted { run });
        self.set_message(StatusMessage::info(MSG_PROCESSING));
        Ok(run)
    }

    /// Wait for the next progress event of the running task and apply it.
    ///
    /// Returns the resulting session event, or `None` when nothing is
    /// running or the event was stale.
    pub async fn pump(&mut self) -> Option<SessionEvent> {
        let task = self.task.as_mut()?;
        let run = task.run();

        match task.next_event().await {
            Some(event) => self.apply_progress(event),
            None => {
                // The task ended without reporting an outcome
                tracing::warn!("Progress task {} ended unexpectedly", run);
                self.task = None;
                if self.phase == (SessionPhase::Processing { run }) {
                    self.finish_cancel(run)
                } else {
                    None
                }
            }
        }
    }

    /// Start a run and drive it until it completes or is cancelled.
    pub async fn process(&mut self) -> SessionResult<RunOutcome> {
        let run = self.run()?;

        while self.phase == (SessionPhase::Processing { run }) {
            self.pump().await;
        }

        Ok(if self.phase.is_completed() {
            RunOutcome::Completed(run)
        } else {
            RunOutcome::Cancelled(run)
        })
    }

    /// Apply an event from the progress task.
    ///
    /// Events from runs other than the current one are ignored.
    pub fn apply_progress(&mut self, event: ProgressEvent) -> Option<SessionEvent> {
        let SessionPhase::Processing { run } = self.phase else {
            tracing::debug!("Ignoring {:?}, no run in progress", event);
            return None;
        };
        if event.run() != run {
            tracing::debug!("Ignoring stale {:?} during {}", event, run);
            return None;
        }

        match event {
            ProgressEvent::Advanced { percent, .. } => {
                let percent = percent.clamp(0.0, COMPLETE);
                if percent > self.progress {
                    self.progress = percent;
                }
                let event = SessionEvent::Progress {
                    run,
                    percent: self.progress,
                };
                self.emit(event.clone());
                Some(event)
            }
            ProgressEvent::Finished { .. } => {
                self.task = None;
                self.progress = COMPLETE;
                self.phase = SessionPhase::Completed { run };
                tracing::info!("{} completed", run);

                let event = SessionEvent::RunCompleted { run };
                self.emit(event.clone());
                self.set_message(StatusMessage::success(MSG_PROCESSED));
                Some(event)
            }
            ProgressEvent::Cancelled { .. } => {
                self.task = None;
                self.finish_cancel(run)
            }
        }
    }

    /// Cancel the running task, returning to the file list.
    pub fn cancel(&mut self) -> Option<RunId> {
        let SessionPhase::Processing { run } = self.phase else {
            return None;
        };
        self.task = None;
        self.finish_cancel(run);
        Some(run)
    }

    /// Output name offered for a selected file under the current tool.
    pub fn processed_name(&self, file: &SelectedFile) -> String {
        processed_file_name(self.tool.unwrap_or(&DEFAULT_TOOL), file.name())
    }

    /// Files offered for download. Empty unless the last run completed.
    pub fn download_targets(&self) -> Vec<DownloadTarget> {
        if !self.phase.is_completed() {
            return Vec::new();
        }
        self.files
            .iter()
            .map(|file| DownloadTarget {
                file_id: file.id,
                original_name: file.name().to_string(),
                output_name: self.processed_name(file),
            })
            .collect()
    }

    /// First half of a download: posts "Downloading <name>...".
    pub fn begin_download(&mut self, id: FileId) -> SessionResult<PendingDownload> {
        if !self.phase.is_completed() {
            return Err(SessionError::DownloadUnavailable);
        }
        let file = self
            .files
            .iter()
            .find(|f| f.id == id)
            .ok_or(SessionError::UnknownFile(id))?;

        let output_name = self.processed_name(file);
        tracing::info!("Download requested: {}", output_name);
        self.set_message(StatusMessage::info(format!("Downloading {}...", output_name)));

        Ok(PendingDownload {
            file_id: id,
            output_name,
        })
    }

    /// Second half of a download: posts "Download started!".
    ///
    /// Returns false (and changes nothing) if the session moved on since
    /// `begin_download`.
    pub fn finish_download(&mut self, pending: PendingDownload) -> bool {
        let still_offered =
            self.phase.is_completed() && self.files.iter().any(|f| f.id == pending.file_id);
        if !still_offered {
            tracing::debug!("Dropping stale download of {}", pending.output_name);
            return false;
        }

        self.set_message(StatusMessage::success(MSG_DOWNLOAD_STARTED));
        self.emit(SessionEvent::DownloadStarted {
            file_id: pending.file_id,
            output_name: pending.output_name,
        });
        true
    }

    /// Simulate a download: both messages, separated by the download delay.
    ///
    /// No bytes are produced. Returns the fabricated output name.
    pub async fn download(&mut self, id: FileId) -> SessionResult<String> {
        let pending = self.begin_download(id)?;
        let output_name = pending.output_name.clone();

        tokio::time::sleep(self.settings.download_delay).await;
        self.finish_download(pending);

        Ok(output_name)
    }

    /// Plain-data view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tool_id: self.tool_id.clone(),
            title: self.tool.map(|t| t.title.to_string()),
            accept: self.tool.map(|t| t.accept.to_string()),
            multiple: self.tool.map(|t| t.multiple),
            phase: self.phase,
            files: self.files.iter().map(FileSummary::from).collect(),
            progress: self.progress,
            message: self.message.clone(),
            downloads: self.download_targets(),
        }
    }

    fn ensure_not_busy(&self) -> SessionResult<()> {
        match self.phase {
            SessionPhase::Processing { run } => Err(SessionError::Busy { run }),
            _ => Ok(()),
        }
    }

    /// Phase and progress after the file list changed outside a run.
    fn after_file_change(&mut self) {
        self.phase = if self.files.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::FilesSelected
        };
        self.progress = 0.0;
        self.emit(SessionEvent::FilesChanged {
            count: self.files.len(),
        });
    }

    /// Stop a running task without posting a message (tool switch, home).
    fn abandon_run(&mut self) {
        // Dropping the task cancels and aborts its timer
        self.task = None;
        if let SessionPhase::Processing { run } = self.phase {
            tracing::info!("Abandoning {}", run);
            self.emit(SessionEvent::RunCancelled { run });
        }
    }

    fn finish_cancel(&mut self, run: RunId) -> Option<SessionEvent> {
        tracing::info!("{} cancelled", run);
        self.progress = 0.0;
        self.phase = if self.files.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::FilesSelected
        };

        let event = SessionEvent::RunCancelled { run };
        self.emit(event.clone());
        self.set_message(StatusMessage::info(MSG_CANCELLED));
        Some(event)
    }

    fn set_message(&mut self, message: StatusMessage) {
        self.message = Some(message.clone());
        self.emit(SessionEvent::Message(message));
    }

    fn clear_message(&mut self) {
        if self.message.take().is_some() {
            self.emit(SessionEvent::MessageCleared);
        }
    }

    fn emit(&self, event: SessionEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }
}
