//! # LogWriter — processed-event logger
//!
//! A minimal listener that logs every processed event through `tracing`.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! INFO quantized::listeners::embedded::log: event processed event=ConfigChanged
//! ```

use std::fmt::Debug;

use async_trait::async_trait;
use tracing::info;

use crate::error::CommandError;
use crate::listeners::Listener;

/// Event logging listener.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<E> Listener<E> for LogWriter
where
    E: Debug + Send + Sync + 'static,
{
    async fn event_processed(&self, event: &E) -> Result<(), CommandError> {
        info!(event = ?event, "event processed");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
