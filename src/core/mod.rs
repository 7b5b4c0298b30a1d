//! Trigger core: debounced scheduling and the consumer loop.
//!
//! The only public API from this module is [`Trigger`] (plus its [`RunState`]).
//!
//! Internal modules:
//! - [`state`]: lock-free `NotRunning / Scheduled / RunImmediately` cell;
//! - [`wakeup`]: delay-ordered wake-up queue (mpsc + min-heap);
//! - [`worker`]: the single consumer loop with fail-stop semantics;
//! - [`trigger`]: public handle, request/shutdown API.

mod state;
mod trigger;
mod wakeup;
mod worker;

pub use state::RunState;
pub use trigger::Trigger;
