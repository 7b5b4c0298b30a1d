//! # Command abstraction.
//!
//! A [`Command`] is the unit of work a [`Trigger`](crate::Trigger) re-runs each
//! time a request is satisfied. The common handle type is [`CommandRef`], an
//! `Arc<dyn Command>`.
//!
//! The command receives a [`CancellationToken`] that is cancelled when the
//! trigger shuts down; long-running commands should check it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::CommandError;

/// Shared handle to a command.
pub type CommandRef = Arc<dyn Command>;

/// # Re-runnable unit of work.
///
/// A command is expected to be robust: an `Err` (or a panic) is treated as a
/// bug and stops the trigger permanently.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use quantized::{Command, CommandError};
///
/// struct Reload;
///
/// #[async_trait]
/// impl Command for Reload {
///     fn name(&self) -> &str { "reload" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), CommandError> {
///         if ctx.is_cancelled() {
///             return Ok(());
///         }
///         // re-apply configuration...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Command: Send + Sync + 'static {
    /// Returns a stable, human-readable command name.
    fn name(&self) -> &str;

    /// Runs the command once.
    async fn run(&self, ctx: CancellationToken) -> Result<(), CommandError>;
}
