//! # EventQueue: coalescing, debounced event dispatch.
//!
//! [`EventQueue`] buffers events posted from any thread and processes them on
//! a single consumer driven by its own [`Trigger`]. Each pass drains the
//! pending list, merges duplicates, runs every survivor and notifies listeners.
//!
//! ## Architecture
//! ```text
//! Producers (many):                          Consumer (one):
//!   post_event() ──┐
//!   post_event() ──┼─► [pending: Mutex<Vec>] ──► Trigger ──► Processor::process_events()
//!   post_event() ──┘         │                       ▲            ├─► coalesce
//!                            └── request_run() ──────┘            ├─► event.process_event()
//!                                                                 └─► listeners (snapshot)
//! ```
//!
//! ## State machine
//! ```text
//! Active (pause_count == 0) ──pause_queue()──► Paused (pause_count > 0)
//!        ▲                                          │
//!        └────── resume_queue() reaching zero ──────┘  (+ request_run)
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use async_trait::async_trait;
//! use quantized::{CommandError, Config, Event, EventQueue};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! struct Reload;
//!
//! #[async_trait]
//! impl Event for Reload {
//!     fn can_be_merged_with(&self, _newer: &Self) -> bool { true }
//!     async fn process_event(&self) -> Result<(), CommandError> { Ok(()) }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let queue = EventQueue::new(Config::with_interval(Duration::from_millis(20)));
//!     queue.post_event(Reload)?;
//!     queue.post_event(Reload)?; // merged with the first one
//!     queue.force_queue();
//!
//!     tokio::time::sleep(Duration::from_millis(50)).await;
//!     assert_eq!(queue.size(), 0);
//!
//!     queue.shutdown();
//!     queue.join().await;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::commands::CommandFn;
use crate::config::Config;
use crate::core::Trigger;
use crate::error::{CommandError, RuntimeError};
use crate::events::Event;
use crate::listeners::{Filtered, ListenerRef};
use crate::queue::processor::Processor;

/// Pause state of a queue, orthogonal to its trigger's run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// Processing runs on schedule.
    Active,
    /// Passes are skipped; events accumulate.
    Paused,
}

/// Queue of mergeable events processed on a single debounced consumer.
///
/// ### Rules
/// - `post_event` never waits for processing.
/// - Survivors are processed in arrival order; a merged duplicate keeps the
///   slot of the first equal event.
/// - Listener notification follows registration order, one event at a time.
/// - A failing event or listener stops the queue; later posts are rejected
///   with [`RuntimeError::WorkerDead`].
pub struct EventQueue<E: Event> {
    trigger: Trigger,
    processor: Arc<Processor<E>>,
}

impl<E: Event> EventQueue<E> {
    /// Creates the queue and its consumer.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(cfg: Config) -> Self {
        let processor = Arc::new(Processor::new(cfg.name.to_string()));

        let shared = Arc::clone(&processor);
        let command = CommandFn::arc(
            format!("{}-events", cfg.name),
            move |_ctx: CancellationToken| {
                let processor = Arc::clone(&shared);
                async move { processor.process_events().await }
            },
        );

        Self {
            trigger: Trigger::new(cfg, command),
            processor,
        }
    }

    /// Posts one event.
    pub fn post_event(&self, event: E) -> Result<(), RuntimeError> {
        self.post_events([event])
    }

    /// Posts events in the given order and requests a debounced run.
    ///
    /// ### Errors
    /// - [`RuntimeError::ShutDown`] after [`EventQueue::shutdown`]
    /// - [`RuntimeError::WorkerDead`] after a fatal processing failure
    pub fn post_events<I>(&self, events: I) -> Result<(), RuntimeError>
    where
        I: IntoIterator<Item = E>,
    {
        self.ensure_running()?;
        let added = self.processor.append(events);
        debug!(
            queue = %self.processor.name,
            added,
            pause_count = self.processor.pause_count(),
            "posted"
        );
        self.trigger.request_run();
        Ok(())
    }

    /// Registers a listener; returns `false` if this exact handle is already registered.
    pub fn add_listener(&self, listener: ListenerRef<E>) -> bool {
        self.processor.listeners.add(listener)
    }

    /// Registers `listener` behind `predicate` and returns the registered wrapper.
    ///
    /// Pass the returned handle to [`EventQueue::remove_listener`] to unregister.
    pub fn add_filtered_listener<P>(&self, listener: ListenerRef<E>, predicate: P) -> ListenerRef<E>
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        let wrapper = Filtered::arc(listener, predicate);
        self.processor.listeners.add(Arc::clone(&wrapper));
        wrapper
    }

    /// Unregisters a listener; returns `false` if it was not registered.
    pub fn remove_listener(&self, listener: &ListenerRef<E>) -> bool {
        self.processor.listeners.remove(listener)
    }

    /// Suspends processing until every pause is balanced by [`EventQueue::resume_queue`].
    ///
    /// Pauses nest.
    pub fn pause_queue(&self) {
        let count = self.processor.pause();
        debug!(queue = %self.processor.name, pause_count = count, "paused");
    }

    /// Balances one [`EventQueue::pause_queue`]; the last one schedules a run.
    ///
    /// ### Errors
    /// [`RuntimeError::UnbalancedResume`] if the queue is not paused.
    pub fn resume_queue(&self) -> Result<(), RuntimeError> {
        match self.processor.resume() {
            Ok(count) => {
                debug!(queue = %self.processor.name, pause_count = count, "resumed");
                if count == 0 {
                    self.trigger.request_run();
                }
                Ok(())
            }
            Err(e) => {
                error!(
                    queue = %self.processor.name,
                    label = e.as_label(),
                    error = %e.as_message(),
                    "unbalanced resume"
                );
                Err(e)
            }
        }
    }

    /// Processes whatever is pending as soon as possible (still on the consumer).
    pub fn force_queue(&self) {
        debug!(queue = %self.processor.name, "forced");
        self.trigger.request_run_immediately();
    }

    /// Number of events waiting for the next pass (approximate).
    pub fn size(&self) -> usize {
        self.processor.len()
    }

    /// Current pause nesting depth.
    pub fn pause_count(&self) -> usize {
        self.processor.pause_count()
    }

    /// [`QueueState::Paused`] while any pause is outstanding.
    pub fn state(&self) -> QueueState {
        if self.processor.pause_count() > 0 {
            QueueState::Paused
        } else {
            QueueState::Active
        }
    }

    /// Stops the consumer. Idempotent; see [`Trigger::shutdown`].
    pub fn shutdown(&self) -> bool {
        self.trigger.shutdown()
    }

    /// Waits for the consumer to exit.
    pub async fn join(&self) {
        self.trigger.join().await;
    }

    /// Returns `false` once the consumer has exited.
    pub fn is_alive(&self) -> bool {
        self.trigger.is_alive()
    }

    /// The failure that stopped the consumer, if any.
    pub fn failure(&self) -> Option<CommandError> {
        self.trigger.failure()
    }

    /// The underlying trigger.
    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    fn ensure_running(&self) -> Result<(), RuntimeError> {
        if self.trigger.is_shutdown() {
            return Err(RuntimeError::ShutDown {
                name: self.processor.name.clone(),
            });
        }
        if let Some(cause) = self.trigger.failure() {
            return Err(RuntimeError::WorkerDead {
                name: self.processor.name.clone(),
                reason: cause.to_string(),
            });
        }
        Ok(())
    }
}
