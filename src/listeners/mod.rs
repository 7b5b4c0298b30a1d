//! # Listeners notified after each processed event.
//!
//! ## Architecture
//! ```text
//! consumer ── event.process_event() ──► ListenerSet::snapshot()
//!                                            │  (registration order)
//!                                            ├──► listener1.event_processed(&event)
//!                                            ├──► Filtered(pred) ──► inner.event_processed
//!                                            └──► listenerN.event_processed(&event)
//! ```
//!
//! ## Contents
//! - [`Listener`] callback trait
//! - [`ListenerSet`] copy-on-write registry
//! - [`Filtered`] predicate wrapper
//! - `LogWriter` tracing listener (feature `logging`)

#[cfg(feature = "logging")]
mod embedded;
mod filtered;
mod listener;
mod set;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use filtered::Filtered;
pub use listener::{Listener, ListenerRef};
pub use set::ListenerSet;
