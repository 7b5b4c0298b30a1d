//! Coalescing event queue built on a [`Trigger`](crate::Trigger).
//!
//! - [`EventQueue`] public handle: post, listeners, pause/resume, force
//! - [`QueueState`] `Active` / `Paused`
//! - `processor` the consumer-side pass (drain, coalesce, dispatch)

mod event_queue;
mod processor;

pub use event_queue::{EventQueue, QueueState};
