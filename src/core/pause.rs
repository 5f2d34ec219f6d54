//! # Pause gate: a single-slot gate for suspending step entry.
//!
//! `pause` acquires the slot, `proceed` releases it. Synchronous step
//! entries pass through [`PauseGate::checkpoint`], which waits until the
//! gate is open and releases it immediately, so a paused execution halts
//! at the next step boundary and continues exactly where it stopped.
//! Async step entries do not observe the gate.

use parking_lot::{Condvar, Mutex};

/// Single-slot gate, initially open.
#[derive(Debug, Default)]
pub struct PauseGate {
    paused: Mutex<bool>,
    opened: Condvar,
}

impl PauseGate {
    /// Creates an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the slot, blocking while another holder has it.
    pub fn pause(&self) {
        let mut paused = self.paused.lock();
        while *paused {
            self.opened.wait(&mut paused);
        }
        *paused = true;
    }

    /// Releases the slot and wakes every waiter.
    pub fn proceed(&self) {
        let mut paused = self.paused.lock();
        *paused = false;
        self.opened.notify_all();
    }

    /// Waits until the gate is open, then returns immediately.
    pub fn checkpoint(&self) {
        let mut paused = self.paused.lock();
        while *paused {
            self.opened.wait(&mut paused);
        }
    }

    /// Whether the slot is currently held.
    pub fn is_paused(&self) -> bool {
        *self.paused.lock()
    }
}
