//! # Commands run by the trigger.
//!
//! - [`Command`] - trait for a re-runnable async unit of work
//! - [`CommandFn`] - closure-backed implementation
//! - [`CommandRef`] - shared reference to a command (`Arc<dyn Command>`)

mod command;
mod command_fn;

pub use command::{Command, CommandRef};
pub use command_fn::CommandFn;
