//! Cancellation for self-rescheduling callbacks.

use std::cell::Cell;
use std::rc::Rc;

/// Shared flag checked by every scheduled continuation before it runs or
/// schedules the next one. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopToken {
    stopped: Rc<Cell<bool>>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Run `step` unless stopped; report whether the caller should schedule
    /// another round.
    pub fn run<F: FnOnce()>(&self, step: F) -> bool {
        if self.is_stopped() {
            return false;
        }
        step();
        !self.is_stopped()
    }
}
