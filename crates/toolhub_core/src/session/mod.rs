//! Tool session state machine.
//!
//! A `ToolSession` holds the selected tool, the selected files and the
//! simulated processing state for one view. Front-ends own their session,
//! call its operations in response to user input and render from the
//! `SessionEvent`s it publishes to subscribed observers.
//!
//! # States
//!
//! ```text
//! Idle ──add_files──▶ FilesSelected ──run──▶ Processing ──finish──▶ Completed
//!  ▲                    │  ▲   ▲                 │                      │
//!  └──remove last file──┘  │   └────cancel───────┘                      │
//!                          └────────────add/remove files────────────────┘
//!
//! select_tool / navigate_home: any state ──▶ Idle (running task cancelled)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use toolhub_core::models::FileHandle;
//! use toolhub_core::session::{SessionSettings, ToolSession};
//!
//! # async fn demo() -> Result<(), toolhub_core::session::SessionError> {
//! let mut session = ToolSession::new(SessionSettings::default());
//! session.subscribe(Box::new(|event| println!("{:?}", event)));
//!
//! session.select_tool("pdf-to-word");
//! session.add_files([FileHandle::new("report.pdf", 52_000)])?;
//! session.process().await?;
//!
//! let target = &session.download_targets()[0];
//! assert_eq!(target.output_name, "report_processed.docx");
//! # Ok(())
//! # }
//! ```

mod errors;
mod output;
mod tool_session;
mod types;

pub use errors::{SessionError, SessionResult};
pub use output::processed_file_name;
pub use tool_session::{
    ToolSession, MSG_CANCELLED, MSG_DOWNLOAD_STARTED, MSG_PROCESSED, MSG_PROCESSING,
    MSG_SELECT_FILES_FIRST,
};
pub use types::{
    DownloadTarget, FileSummary, PendingDownload, RunOutcome, SessionEvent, SessionObserver,
    SessionPhase, SessionSettings, SessionSnapshot,
};
