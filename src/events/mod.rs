//! Events: the contract implemented by queued values and the batch coalescer.
//!
//! ## Contents
//! - [`Event`] merge predicate and self-contained side effect
//! - `coalesce` collapses a drained batch before processing

mod coalesce;
mod event;

pub(crate) use coalesce::coalesce;
pub use event::Event;
