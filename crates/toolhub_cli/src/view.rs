//! Terminal rendering of session events.

use std::io::{self, Write};

use toolhub_core::catalog::ToolDescriptor;
use toolhub_core::models::{FileHandle, MessageKind, StatusMessage};
use toolhub_core::session::{SessionEvent, SessionObserver};

const BAR_WIDTH: usize = 30;

/// Progress bar like `[#########.....................]  30%`.
pub fn render_bar(percent: f64, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        percent
    )
}

/// One timestamped line for a status message.
pub fn render_message(message: &StatusMessage) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S");
    let marker = match message.kind {
        MessageKind::Info => "i",
        MessageKind::Success => "+",
        MessageKind::Error => "!",
    };
    format!("[{}] {} {}", timestamp, marker, message.text)
}

/// Warnings for files the tool's picker would not have offered.
///
/// The session keeps such files; these are advisory only.
pub fn file_warnings(tool: &ToolDescriptor, files: &[FileHandle]) -> Vec<String> {
    let mut warnings = Vec::new();

    if !tool.multiple && files.len() > 1 {
        warnings.push(format!(
            "{} works on a single file, {} given",
            tool.title,
            files.len()
        ));
    }

    for file in files.iter().filter(|f| !tool.accepts(&f.name)) {
        warnings.push(format!("{} is not one of {}", file.name, tool.accept));
    }

    warnings
}

/// Observer printing live progress and messages to stdout.
pub fn terminal_observer() -> SessionObserver {
    Box::new(|event| {
        let mut out = io::stdout().lock();
        // Output is best effort; a closed stdout must not stop the session
        let _ = write_event(&mut out, event);
        let _ = out.flush();
    })
}

fn write_event(out: &mut impl Write, event: &SessionEvent) -> io::Result<()> {
    match event {
        SessionEvent::ToolSelected { title, .. } => writeln!(out, "{}", title),
        SessionEvent::FilesChanged { count } => writeln!(out, "{} file(s) selected", count),
        SessionEvent::Progress { percent, .. } => {
            write!(out, "\r{}", render_bar(*percent, BAR_WIDTH))
        }
        SessionEvent::RunCompleted { .. } | SessionEvent::RunCancelled { .. } => writeln!(out),
        SessionEvent::Message(message) => writeln!(out, "{}", render_message(message)),
        SessionEvent::DownloadStarted { output_name, .. } => {
            writeln!(out, "  -> {}", output_name)
        }
        SessionEvent::RunStarted { .. } | SessionEvent::Reset | SessionEvent::MessageCleared => {
            Ok(())
        }
    }
}
