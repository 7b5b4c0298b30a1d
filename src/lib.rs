//! # quantized
//!
//! **quantized** coalesces a high-frequency stream of "something changed, run
//! again" signals into bounded-latency executions on a single consumer.
//!
//! Two layers:
//! - [`Trigger`] — a debounced executor. `request_run()` schedules the command
//!   at most once per interval; `request_run_immediately()` skips the wait.
//! - [`EventQueue`] — a queue of mergeable [`Event`]s processed by its own
//!   trigger. Each pass drains the pending list, merges duplicates, processes
//!   survivors in order and notifies [`Listener`]s.
//!
//! ## Architecture
//! ```text
//!   any thread                                   consumer task (one per trigger)
//! ┌──────────────┐  append   ┌──────────────────┐
//! │ post_event() │─────────► │ pending (Mutex)  │
//! └──────┬───────┘           └────────┬─────────┘
//!        │ request_run()              │ swap on each pass
//!        ▼                            ▼
//! ┌──────────────┐  wake-up  ┌──────────────────┐    ┌──────────────┐
//! │ RunState CAS │─────────► │ delay queue      │──► │ Worker::run  │
//! └──────────────┘           └──────────────────┘    └──────┬───────┘
//!                                                           ▼
//!                                        coalesce ─► process_event ─► listeners
//! ```
//!
//! ## Failure model
//! Preconditions (unbalanced resume, posting after shutdown) return
//! [`RuntimeError`]. A failing command, event or listener ([`CommandError`] or a
//! panic) is logged and stops the consumer for good: the trigger stays
//! inspectable through `is_alive()` / `failure()` but never runs again.
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], a listener that logs processed events.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use async_trait::async_trait;
//! use quantized::{CommandError, Config, Event, EventQueue, Listener};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum Change {
//!     Config,
//!     Peers,
//! }
//!
//! #[async_trait]
//! impl Event for Change {
//!     fn can_be_merged_with(&self, _newer: &Self) -> bool {
//!         true
//!     }
//!
//!     async fn process_event(&self) -> Result<(), CommandError> {
//!         Ok(())
//!     }
//! }
//!
//! struct Print;
//!
//! #[async_trait]
//! impl Listener<Change> for Print {
//!     async fn event_processed(&self, event: &Change) -> Result<(), CommandError> {
//!         println!("applied {event:?}");
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let queue = EventQueue::new(Config::with_interval(Duration::from_millis(50)));
//!     queue.add_listener(Arc::new(Print));
//!
//!     // three signals inside one window: Config is applied once, then Peers
//!     queue.post_events([Change::Config, Change::Peers, Change::Config])?;
//!     tokio::time::sleep(Duration::from_millis(100)).await;
//!
//!     queue.shutdown();
//!     queue.join().await;
//!     Ok(())
//! }
//! ```
mod commands;
mod config;
mod core;
mod error;
mod events;
mod listeners;
mod queue;

// ---- Public re-exports ----

pub use commands::{Command, CommandFn, CommandRef};
pub use config::Config;
pub use crate::core::{RunState, Trigger};
pub use error::{CommandError, RuntimeError};
pub use events::Event;
pub use listeners::{Filtered, Listener, ListenerRef, ListenerSet};
pub use queue::{EventQueue, QueueState};

// Optional: expose a simple built-in logging listener.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogWriter;
