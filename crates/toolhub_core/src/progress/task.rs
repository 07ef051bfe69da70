//! Cancellable timer task driving a progress sequence.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use super::generator::FakeProgress;

/// Identifier of one processing run within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(u64);

impl RunId {
    pub fn new(n: u64) -> Self {
        Self(n)
    }

    /// The run that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// Timer settings for a progress task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTiming {
    /// Interval between progress ticks.
    pub tick: Duration,
    /// Delay between reaching 100% and reporting the run finished.
    pub settle: Duration,
}

impl Default for ProgressTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(200),
            settle: Duration::from_millis(500),
        }
    }
}

/// Event emitted by a progress task, in scheduled order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    /// Progress moved to `percent`.
    Advanced { run: RunId, percent: f64 },
    /// Progress reached 100 and the settle delay elapsed.
    Finished { run: RunId },
    /// The task observed a cancellation request and stopped.
    Cancelled { run: RunId },
}

impl ProgressEvent {
    /// Run this event belongs to.
    pub fn run(&self) -> RunId {
        match *self {
            ProgressEvent::Advanced { run, .. }
            | ProgressEvent::Finished { run }
            | ProgressEvent::Cancelled { run } => run,
        }
    }
}

/// Handle for cancelling a running progress task.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Request cancellation.
    ///
    /// The task stops at its next tick boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Cloneable view of a running task: poll its progress or cancel it.
#[derive(Debug, Clone)]
pub struct ProgressHandle {
    run: RunId,
    cancel: CancelHandle,
    latest: Arc<Mutex<f64>>,
}

impl ProgressHandle {
    pub fn run(&self) -> RunId {
        self.run
    }

    /// Latest progress percentage published by the task.
    pub fn percent(&self) -> f64 {
        *self.latest.lock()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// A spawned progress animation.
///
/// Dropping the task cancels and aborts it, so an abandoned run never
/// leaves a timer behind.
pub struct ProgressTask {
    handle: ProgressHandle,
    events: mpsc::UnboundedReceiver<ProgressEvent>,
    join: JoinHandle<()>,
}

impl ProgressTask {
    /// Spawn the timer task on `runtime`.
    pub fn spawn(
        runtime: &Handle,
        run: RunId,
        progress: FakeProgress,
        timing: ProgressTiming,
    ) -> Self {
        let handle = ProgressHandle {
            run,
            cancel: CancelHandle::default(),
            latest: Arc::new(Mutex::new(0.0)),
        };
        let (tx, events) = mpsc::unbounded_channel();

        tracing::debug!(
            "Spawning progress task {} (tick {:?}, settle {:?})",
            run,
            timing.tick,
            timing.settle
        );
        let join = runtime.spawn(drive(handle.clone(), progress, timing, tx));

        Self {
            handle,
            events,
            join,
        }
    }

    pub fn run(&self) -> RunId {
        self.handle.run
    }

    /// Get a cloneable handle for polling and cancellation.
    pub fn handle(&self) -> ProgressHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// Wait for the next event. Returns `None` once the task has ended
    /// and all of its events were received.
    pub async fn next_event(&mut self) -> Option<ProgressEvent> {
        self.events.recv().await
    }
}

impl Drop for ProgressTask {
    fn drop(&mut self) {
        self.handle.cancel();
        self.join.abort();
    }
}

async fn drive(
    handle: ProgressHandle,
    mut progress: FakeProgress,
    timing: ProgressTiming,
    tx: mpsc::UnboundedSender<ProgressEvent>,
) {
    let run = handle.run;
    // Zero periods are rejected by tokio's interval.
    let tick = timing.tick.max(Duration::from_millis(1));
    let mut ticker = time::interval_at(Instant::now() + tick, tick);

    loop {
        ticker.tick().await;

        if handle.is_cancelled() {
            tracing::debug!("Progress task {} cancelled at {:.1}%", run, progress.current());
            let _ = tx.send(ProgressEvent::Cancelled { run });
            return;
        }

        let Some(percent) = progress.advance() else {
            break;
        };
        *handle.latest.lock() = percent;
        tracing::trace!("{} progress {:.1}%", run, percent);

        if tx.send(ProgressEvent::Advanced { run, percent }).is_err() {
            // Receiver gone; nobody is watching this run anymore.
            return;
        }
        if progress.is_done() {
            break;
        }
    }

    time::sleep(timing.settle).await;

    if handle.is_cancelled() {
        let _ = tx.send(ProgressEvent::Cancelled { run });
        return;
    }

    tracing::debug!("Progress task {} finished after {} ticks", run, progress.ticks());
    let _ = tx.send(ProgressEvent::Finished { run });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressMode;

    fn fixed(step: f64) -> FakeProgress {
        FakeProgress::seeded(ProgressMode::Fixed { step }, 15, 0)
    }

    async fn collect(task: &mut ProgressTask) -> Vec<ProgressEvent> {
        let mut events = Vec::new();
        while let Some(event) = task.next_event().await {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn emits_ticks_then_finished() {
        let run = RunId::new(1);
        let start = Instant::now();
        let mut task = ProgressTask::spawn(
            &Handle::current(),
            run,
            fixed(25.0),
            ProgressTiming::default(),
        );

        let events = collect(&mut task).await;

        assert_eq!(
            events,
            vec![
                ProgressEvent::Advanced { run, percent: 25.0 },
                ProgressEvent::Advanced { run, percent: 50.0 },
                ProgressEvent::Advanced { run, percent: 75.0 },
                ProgressEvent::Advanced { run, percent: 100.0 },
                ProgressEvent::Finished { run },
            ]
        );
        // Four 200ms ticks plus the 500ms settle delay.
        assert_eq!(start.elapsed(), Duration::from_millis(1300));
        assert_eq!(task.handle().percent(), 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_at_next_tick() {
        let run = RunId::new(7);
        let mut task = ProgressTask::spawn(
            &Handle::current(),
            run,
            fixed(10.0),
            ProgressTiming::default(),
        );

        assert_eq!(
            task.next_event().await,
            Some(ProgressEvent::Advanced { run, percent: 10.0 })
        );
        task.handle().cancel();

        let rest = collect(&mut task).await;
        assert_eq!(rest, vec![ProgressEvent::Cancelled { run }]);
        assert_eq!(task.handle().percent(), 10.0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_settle_reports_cancelled() {
        let run = RunId::new(2);
        let mut task = ProgressTask::spawn(
            &Handle::current(),
            run,
            fixed(100.0),
            ProgressTiming::default(),
        );

        assert_eq!(
            task.next_event().await,
            Some(ProgressEvent::Advanced { run, percent: 100.0 })
        );
        task.cancel();

        assert_eq!(collect(&mut task).await, vec![ProgressEvent::Cancelled { run }]);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_tick_interval_does_not_panic() {
        let timing = ProgressTiming {
            tick: Duration::ZERO,
            settle: Duration::ZERO,
        };
        let mut task = ProgressTask::spawn(
            &Handle::current(),
            RunId::new(3),
            fixed(50.0),
            timing,
        );
        let events = collect(&mut task).await;
        assert_eq!(events.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_task_sets_cancel_flag() {
        let task = ProgressTask::spawn(
            &Handle::current(),
            RunId::new(4),
            fixed(10.0),
            ProgressTiming::default(),
        );
        let handle = task.handle();
        drop(task);
        assert!(handle.is_cancelled());
    }

    #[test]
    fn run_ids_increment() {
        let run = RunId::new(1);
        assert_eq!(run.next(), RunId::new(2));
        assert_eq!(run.next().to_string(), "run-2");
    }
}
