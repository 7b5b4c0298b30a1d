//! # Lock-free run state of a trigger.
//!
//! ```text
//!              request_run()                 consumer wakes
//! NotRunning ───────────────► Scheduled ───────────────────► NotRunning
//!     │                           │                              ▲
//!     │ request_run_immediately() │ request_run_immediately()    │
//!     └──────────────► RunImmediately ◄──┘                       │
//!                           └────────────────────────────────────┘
//! ```
//!
//! Every transition is a single atomic CAS or swap; no lock is ever taken.

use std::sync::atomic::{AtomicU8, Ordering};

/// Scheduling state of a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing scheduled; the next `request_run()` enqueues a wake-up.
    NotRunning,
    /// A debounced wake-up is pending.
    Scheduled,
    /// An immediate wake-up is pending.
    RunImmediately,
}

impl RunState {
    fn as_u8(self) -> u8 {
        match self {
            RunState::NotRunning => 0,
            RunState::Scheduled => 1,
            RunState::RunImmediately => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => RunState::Scheduled,
            2 => RunState::RunImmediately,
            _ => RunState::NotRunning,
        }
    }
}

/// Atomic cell holding a [`RunState`].
#[derive(Debug)]
pub struct AtomicRunState(AtomicU8);

impl AtomicRunState {
    pub fn new() -> Self {
        Self(AtomicU8::new(RunState::NotRunning.as_u8()))
    }

    pub fn load(&self) -> RunState {
        RunState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Moves `NotRunning → Scheduled`.
    ///
    /// Returns `true` for exactly one caller per idle period; that caller owns
    /// the duty of enqueueing the wake-up.
    pub fn try_schedule(&self) -> bool {
        self.0
            .compare_exchange(
                RunState::NotRunning.as_u8(),
                RunState::Scheduled.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Forces `RunImmediately`; returns the previous state.
    pub fn force_immediate(&self) -> RunState {
        RunState::from_u8(
            self.0
                .swap(RunState::RunImmediately.as_u8(), Ordering::AcqRel),
        )
    }

    /// Re-arms the state. Called by the consumer after it cleared its wake-ups.
    pub fn reset(&self) {
        self.0.store(RunState::NotRunning.as_u8(), Ordering::Release);
    }
}
