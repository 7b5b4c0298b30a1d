//! # Function-backed command (`CommandFn`)
//!
//! [`CommandFn`] wraps a closure `F: Fn(CancellationToken) -> Fut`, producing a
//! fresh future per run. Shared state between runs must be captured explicitly
//! (usually through an `Arc`).
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use quantized::{CommandError, CommandFn, CommandRef};
//!
//! let c: CommandRef = CommandFn::arc("flush", |_ctx: CancellationToken| async {
//!     Ok::<_, CommandError>(())
//! });
//! assert_eq!(c.name(), "flush");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::commands::command::Command;
use crate::error::CommandError;

/// Function-backed command implementation.
#[derive(Debug)]
pub struct CommandFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> CommandFn<F> {
    /// Creates a new function-backed command.
    ///
    /// Prefer [`CommandFn::arc`] when you immediately need a [`CommandRef`](crate::CommandRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the command and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Command for CommandFn<F>
where
    F: Fn(CancellationToken) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), CommandError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), CommandError> {
        (self.f)(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_each_run_builds_a_fresh_future() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let cmd = CommandFn::new("count", move |_ctx: CancellationToken| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), CommandError>(())
            }
        });

        cmd.run(CancellationToken::new()).await.unwrap();
        cmd.run(CancellationToken::new()).await.unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert_eq!(cmd.name(), "count");
    }

    #[tokio::test]
    async fn test_error_is_passed_through() {
        let cmd = CommandFn::new("broken", |_ctx: CancellationToken| async {
            Err::<(), _>(CommandError::fail("nope"))
        });
        let err = cmd.run(CancellationToken::new()).await.unwrap_err();
        assert_eq!(err, CommandError::fail("nope"));
    }
}
