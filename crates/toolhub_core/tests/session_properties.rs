//! End-to-end behavior of tool sessions driven through the public API.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use toolhub_core::catalog;
use toolhub_core::models::{FileHandle, MessageKind, StatusMessage};
use toolhub_core::progress::{FakeProgress, ProgressMode, ProgressTiming};
use toolhub_core::session::{
    RunOutcome, SessionEvent, SessionPhase, SessionSettings, ToolSession, MSG_PROCESSED,
    MSG_SELECT_FILES_FIRST,
};

fn files(names: &[&str]) -> Vec<FileHandle> {
    names
        .iter()
        .enumerate()
        .map(|(i, n)| FileHandle::new(*n, 1000 * (i as u64 + 1)))
        .collect()
}

fn progress_values(events: &[SessionEvent]) -> Vec<f64> {
    events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::Progress { percent, .. } => Some(*percent),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn random_runs_are_monotonic_and_end_at_100() {
    for seed in 0..20 {
        let mut session = ToolSession::new(SessionSettings {
            seed: Some(seed),
            ..SessionSettings::default()
        });
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        session.subscribe(Box::new(move |e| sink.lock().push(e.clone())));

        session.select_tool("merge-pdf");
        session.add_files(files(&["a.pdf", "b.pdf"])).unwrap();
        let outcome = session.process().await.unwrap();
        assert!(matches!(outcome, RunOutcome::Completed(_)));

        let values = progress_values(&events.lock());
        assert!(!values.is_empty());
        assert!(values.len() <= 15, "seed {} took {} ticks", seed, values.len());
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.iter().all(|v| (0.0..=100.0).contains(v)));
        assert_eq!(values.last(), Some(&100.0));
    }
}

#[tokio::test(start_paused = true)]
async fn completion_message_follows_settle_delay() {
    let mut session = ToolSession::new(SessionSettings {
        mode: ProgressMode::Fixed { step: 25.0 },
        ..SessionSettings::default()
    });
    session.select_tool("compress-pdf");
    session.add_files(files(&["big.pdf"])).unwrap();

    let start = Instant::now();
    session.process().await.unwrap();

    // 4 ticks of 200ms, then the 500ms settle
    assert_eq!(start.elapsed(), Duration::from_millis(1300));
    assert_eq!(session.message(), Some(&StatusMessage::success(MSG_PROCESSED)));
}

#[tokio::test(start_paused = true)]
async fn custom_timing_is_honored() {
    let mut session = ToolSession::new(SessionSettings {
        mode: ProgressMode::Fixed { step: 50.0 },
        timing: ProgressTiming {
            tick: Duration::from_millis(10),
            settle: Duration::from_millis(0),
        },
        ..SessionSettings::default()
    });
    session.select_tool("merge-pdf");
    session.add_files(files(&["a.pdf"])).unwrap();

    let start = Instant::now();
    session.process().await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_millis(20));
}

#[test]
fn unknown_tools_get_generic_descriptor() {
    let mut session = ToolSession::new(SessionSettings::default());
    let tool = session.select_tool("pdf-merge");

    assert_eq!(tool.title, "Process Files");
    assert_eq!(tool.description, "Select files to process");
    assert_eq!(tool.accept.to_string(), "*/*");
    assert!(tool.multiple);
    assert!(tool.is_fallback());
}

#[test]
fn every_catalog_tool_round_trips_through_select() {
    let mut session = ToolSession::new(SessionSettings::default());
    for tool in catalog::all() {
        let selected = session.select_tool(tool.id);
        assert_eq!(selected, tool);
        assert_eq!(session.snapshot().title.as_deref(), Some(tool.title));
    }
}

#[test]
fn empty_run_is_refused_with_error_message() {
    let mut session = ToolSession::new(SessionSettings::default());
    session.select_tool("split-pdf");

    assert!(session.run().is_err());
    let message = session.message().unwrap();
    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.text, MSG_SELECT_FILES_FIRST);
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.progress_handle().is_none());
}

#[tokio::test(start_paused = true)]
async fn download_names_follow_tool_output() {
    let cases = [
        ("pdf-to-word", "report.pdf", "report_processed.docx"),
        ("word-to-pdf", "letter.docx", "letter_processed.pdf"),
        ("pdf-to-jpg", "slides.pdf", "slides_processed.jpg"),
        ("jpg-to-pdf", "scan.jpg", "scan_processed.pdf"),
        ("compress-image", "photo.png", "photo_processed.jpg"),
        ("compress-pdf", "big.pdf", "big_processed.pdf"),
        ("merge-pdf", "a.b.pdf", "a_processed"),
        ("unknown-tool", "notes.txt", "notes_processed"),
    ];

    for (tool, input, expected) in cases {
        let mut session = ToolSession::new(SessionSettings {
            mode: ProgressMode::Fixed { step: 100.0 },
            ..SessionSettings::default()
        });
        session.select_tool(tool);
        session.add_files(files(&[input])).unwrap();
        session.process().await.unwrap();

        let targets = session.download_targets();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].output_name, expected, "tool {}", tool);
    }
}

#[tokio::test(start_paused = true)]
async fn switching_tools_mid_run_resets_state() {
    let mut session = ToolSession::new(SessionSettings::default());
    session.select_tool("merge-pdf");
    session.add_files(files(&["a.pdf", "b.pdf", "c.pdf"])).unwrap();
    let run = session.run().unwrap();
    session.pump().await;
    assert_eq!(session.phase(), SessionPhase::Processing { run });
    let handle = session.progress_handle().unwrap();

    session.select_tool("rotate-image");

    assert!(handle.is_cancelled());
    assert!(session.progress_handle().is_none());
    let snapshot = session.snapshot();
    assert_eq!(snapshot.tool_id.as_deref(), Some("rotate-image"));
    assert!(snapshot.files.is_empty());
    assert_eq!(snapshot.progress, 0.0);
    assert_eq!(snapshot.phase, SessionPhase::Idle);
    assert!(snapshot.message.is_none());
}

#[tokio::test(start_paused = true)]
async fn navigate_home_mid_run_stops_timer() {
    let mut session = ToolSession::new(SessionSettings {
        mode: ProgressMode::Fixed { step: 10.0 },
        ..SessionSettings::default()
    });
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session.subscribe(Box::new(move |e| sink.lock().push(e.clone())));

    session.select_tool("compress-pdf");
    session.add_files(files(&["big.pdf"])).unwrap();
    let run = session.run().unwrap();
    session.pump().await;
    session.pump().await;
    assert_eq!(session.progress(), 20.0);
    let handle = session.progress_handle().unwrap();

    session.navigate_home();

    assert!(handle.is_cancelled());
    assert_eq!(handle.percent(), 20.0);
    assert_eq!(session.pump().await, None);

    let snapshot = session.snapshot();
    assert!(snapshot.tool_id.is_none());
    assert!(snapshot.title.is_none());
    assert!(snapshot.files.is_empty());
    assert_eq!(snapshot.progress, 0.0);
    assert_eq!(snapshot.phase, SessionPhase::Idle);
    assert!(snapshot.message.is_none());
    assert!(snapshot.downloads.is_empty());

    // Time passing after the switch produces no further progress
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(handle.percent(), 20.0);
    let tail: Vec<SessionEvent> = events.lock().iter().rev().take(2).cloned().collect();
    assert_eq!(tail, vec![SessionEvent::Reset, SessionEvent::RunCancelled { run }]);
}

#[test]
fn fixed_progress_is_deterministic() {
    let values: Vec<f64> = FakeProgress::new(ProgressMode::Fixed { step: 30.0 }, 15).collect();
    assert_eq!(values, vec![30.0, 60.0, 90.0, 100.0]);
}
