//! Error types for tool sessions.

use thiserror::Error;

use crate::models::FileId;
use crate::progress::RunId;

/// Error from a session operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `run()` was requested without a tool or without files.
    #[error("No tool or no files selected")]
    NothingSelected,

    /// The operation is not allowed while a run is in progress.
    #[error("Processing is in progress ({run})")]
    Busy { run: RunId },

    /// Downloads are offered only after a run completed.
    #[error("Downloads are only available after processing completes")]
    DownloadUnavailable,

    /// `run()` needs a Tokio runtime to drive the progress timer.
    #[error("Processing needs a Tokio runtime")]
    NoRuntime,

    /// No selected file has this id.
    #[error("No selected file with id {0}")]
    UnknownFile(FileId),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_error_names_run() {
        let err = SessionError::Busy { run: RunId::new(3) };
        assert!(err.to_string().contains("run-3"));
    }
}
