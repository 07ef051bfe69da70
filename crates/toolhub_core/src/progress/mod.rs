//! Simulated processing progress.
//!
//! Processing is a visual simulation: a percentage advances on a fixed
//! tick until it reaches 100, then a short settle delay elapses before
//! the run is reported finished. Nothing is computed.
//!
//! - `FakeProgress`: the pure sequence of percentages for one run
//! - `ProgressTask`: a cancellable timer task that emits `ProgressEvent`s
//! - `ProgressHandle`: cloneable handle to poll or cancel a running task

mod generator;
mod task;

pub use generator::{FakeProgress, ProgressMode};
pub use task::{CancelHandle, ProgressEvent, ProgressHandle, ProgressTask, ProgressTiming, RunId};

/// Upper bound of the progress percentage.
pub const COMPLETE: f64 = 100.0;
