//! # Listener trait.
//!
//! Provides [`Listener`], the hook notified after the queue processed an event.
//!
//! ## Rules
//! - Called on the queue's consumer, after [`Event::process_event`](crate::Event::process_event).
//! - Listeners are notified in registration order, one event at a time.
//! - An `Err` (or panic) is fatal for the queue: it is logged and processing stops.
//! - A listener may add or remove listeners (itself included) from inside the callback.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use async_trait::async_trait;
//! use quantized::{CommandError, Event, Listener};
//!
//! struct Counter(AtomicU64);
//!
//! #[async_trait]
//! impl<E: Event> Listener<E> for Counter {
//!     async fn event_processed(&self, _event: &E) -> Result<(), CommandError> {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str { "counter" }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CommandError;

/// Shared handle to a listener; identity (pointer) is used for removal.
pub type ListenerRef<E> = Arc<dyn Listener<E>>;

/// Callback notified once per processed event.
#[async_trait]
pub trait Listener<E>: Send + Sync + 'static {
    /// Called after `event` has been processed.
    async fn event_processed(&self, event: &E) -> Result<(), CommandError>;

    /// Returns the listener name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
