//! # Processor: the queue's consumer-side core.
//!
//! Shared between the [`EventQueue`](crate::EventQueue) handle (producers) and
//! the trigger command (consumer). It never references the trigger.
//!
//! ## Processing pass
//! ```text
//! paused? ──yes──► return (events stay queued)
//!    │no
//!    ▼
//! swap pending ↔ empty          (only point of contention with producers)
//!    ▼
//! coalesce(batch)               (merged duplicates collapse into their first slot)
//!    ▼
//! for event in survivors:
//!     event.process_event()
//!     for listener in snapshot: listener.event_processed(&event)
//! ```
//!
//! Any error aborts the pass and is returned to the trigger, which stops for good.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::{debug, error};

use crate::error::{CommandError, RuntimeError};
use crate::events::{Event, coalesce};
use crate::listeners::ListenerSet;

pub struct Processor<E> {
    pub name: String,
    pending: Mutex<Vec<E>>,
    pub listeners: ListenerSet<E>,
    pause_count: AtomicUsize,
}

impl<E: Event> Processor<E> {
    pub fn new(name: String) -> Self {
        Self {
            name,
            pending: Mutex::new(Vec::new()),
            listeners: ListenerSet::new(),
            pause_count: AtomicUsize::new(0),
        }
    }

    /// Appends `events` in order; returns how many were added.
    pub fn append<I: IntoIterator<Item = E>>(&self, events: I) -> usize {
        let mut pending = self.pending.lock();
        let before = pending.len();
        pending.extend(events);
        pending.len() - before
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn pause_count(&self) -> usize {
        self.pause_count.load(Ordering::Acquire)
    }

    /// Returns the new pause count.
    pub fn pause(&self) -> usize {
        self.pause_count.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Returns the new pause count, or an error if it would drop below zero.
    pub fn resume(&self) -> Result<usize, RuntimeError> {
        self.pause_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .map(|prev| prev - 1)
            .map_err(|_| RuntimeError::UnbalancedResume)
    }

    /// One processing pass; runs on the trigger's consumer only.
    pub async fn process_events(&self) -> Result<(), CommandError> {
        let paused = self.pause_count();
        if paused > 0 {
            debug!(queue = %self.name, pause_count = paused, "paused; skipping pass");
            return Ok(());
        }

        let batch = std::mem::take(&mut *self.pending.lock());
        if batch.is_empty() {
            return Ok(());
        }
        let received = batch.len();
        let survivors = coalesce(batch);
        debug!(
            queue = %self.name,
            received,
            survivors = survivors.len(),
            "processing batch"
        );

        for event in &survivors {
            if let Err(e) = event.process_event().await {
                error!(queue = %self.name, error = %e, "event processing failed");
                return Err(e);
            }
            let listeners = self.listeners.snapshot();
            for listener in listeners.iter() {
                if let Err(e) = listener.event_processed(event).await {
                    error!(
                        queue = %self.name,
                        listener = listener.name(),
                        error = %e,
                        "listener failed"
                    );
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}
