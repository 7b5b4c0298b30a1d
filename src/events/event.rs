//! # Event contract for the coalescing queue.
//!
//! An [`Event`] is a value posted to an [`EventQueue`](crate::EventQueue). Two
//! events that compare equal (`Eq + Hash`) are candidates for merging inside a
//! single processing batch; [`Event::can_be_merged_with`] decides.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use quantized::{CommandError, Event};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum Signal {
//!     ConfigChanged,
//!     PeersChanged,
//! }
//!
//! #[async_trait]
//! impl Event for Signal {
//!     fn can_be_merged_with(&self, _newer: &Self) -> bool {
//!         true
//!     }
//!
//!     async fn process_event(&self) -> Result<(), CommandError> {
//!         Ok(())
//!     }
//! }
//! ```

use std::hash::Hash;

use async_trait::async_trait;

use crate::error::CommandError;

/// Value processed by an [`EventQueue`](crate::EventQueue).
///
/// Equality defines identity for merging; it may cover only part of the value
/// (a key) so that a newer payload can replace an older one.
#[async_trait]
pub trait Event: Eq + Hash + Send + Sync + 'static {
    /// Returns `true` if `newer` can take the place of `self`.
    ///
    /// Called on the event already kept in the batch, with a later equal
    /// event as the argument. On `true` the later event replaces `self` in
    /// its slot; on `false` both are processed.
    fn can_be_merged_with(&self, newer: &Self) -> bool;

    /// Performs the event's own side effect.
    ///
    /// Runs on the queue's consumer, before listeners are notified. An error
    /// stops the queue.
    async fn process_event(&self) -> Result<(), CommandError>;
}
