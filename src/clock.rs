//! Frame timing.

use std::cell::Cell;

/// Millisecond wall-clock source.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock that only moves when told to. Used to drive sessions in tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now: Cell::new(now_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Timing of one frame relative to the clock's epoch and the previous frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Seconds since the epoch; the phase input of the particle drift.
    pub elapsed_secs: f64,
    /// Seconds since the previous tick, never negative.
    pub delta_secs: f64,
}

/// Turns raw timestamps into elapsed time and per-frame deltas.
#[derive(Clone, Debug)]
pub struct FrameClock {
    epoch_ms: f64,
    last_ms: f64,
}

impl FrameClock {
    pub fn new(epoch_ms: f64) -> Self {
        Self {
            epoch_ms,
            last_ms: epoch_ms,
        }
    }

    pub fn tick(&mut self, now_ms: f64) -> FrameTick {
        let delta_ms = (now_ms - self.last_ms).max(0.0);
        self.last_ms = self.last_ms.max(now_ms);
        FrameTick {
            elapsed_secs: (now_ms - self.epoch_ms) / 1000.0,
            delta_secs: delta_ms / 1000.0,
        }
    }

    pub fn epoch_ms(&self) -> f64 {
        self.epoch_ms
    }
}
