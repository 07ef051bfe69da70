//! Progress sequence generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::COMPLETE;

/// How much progress is added per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressMode {
    /// Uniformly random increment in `[0, max_step)`.
    Random { max_step: f64 },
    /// Constant increment.
    Fixed { step: f64 },
}

impl Default for ProgressMode {
    fn default() -> Self {
        ProgressMode::Random { max_step: 20.0 }
    }
}

/// Sequence of progress percentages for one run.
///
/// Yields non-decreasing values and always ends with exactly `100.0`.
/// Once `max_ticks` values have been produced the sequence jumps to 100,
/// so a run never takes more than `max_ticks` ticks.
#[derive(Debug)]
pub struct FakeProgress {
    mode: ProgressMode,
    rng: StdRng,
    current: f64,
    ticks: u32,
    max_ticks: u32,
    done: bool,
}

impl FakeProgress {
    /// Create a sequence seeded from the OS.
    pub fn new(mode: ProgressMode, max_ticks: u32) -> Self {
        Self::with_rng(mode, max_ticks, StdRng::from_os_rng())
    }

    /// Create a reproducible sequence.
    pub fn seeded(mode: ProgressMode, max_ticks: u32, seed: u64) -> Self {
        Self::with_rng(mode, max_ticks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mode: ProgressMode, max_ticks: u32, rng: StdRng) -> Self {
        Self {
            mode,
            rng,
            current: 0.0,
            ticks: 0,
            max_ticks: max_ticks.max(1),
            done: false,
        }
    }

    /// Current percentage.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Ticks produced so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Whether the sequence has reached 100.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance by one tick. Returns `None` once 100 has been yielded.
    pub fn advance(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }

        self.ticks += 1;
        self.current += self.next_step();

        if self.current >= COMPLETE || self.ticks >= self.max_ticks {
            self.current = COMPLETE;
            self.done = true;
        }

        Some(self.current)
    }

    fn next_step(&mut self) -> f64 {
        let step = match self.mode {
            ProgressMode::Random { max_step } if max_step > 0.0 => {
                self.rng.random_range(0.0..max_step)
            }
            ProgressMode::Random { .. } => 0.0,
            ProgressMode::Fixed { step } => step,
        };
        // Negative or NaN steps would break monotonicity.
        if step.is_finite() && step > 0.0 {
            step
        } else {
            0.0
        }
    }
}

impl Iterator for FakeProgress {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.advance()
    }
}
