//! # Trigger and queue configuration.
//!
//! Provides [`Config`], the settings shared by [`Trigger`](crate::Trigger) and
//! [`EventQueue`](crate::EventQueue).
//!
//! ## Sentinel values
//! - `interval = 0s` → no debounce: a request runs as soon as the consumer is free.

use std::borrow::Cow;
use std::time::Duration;

/// Configuration for a trigger (and the queue built on top of it).
///
/// ## Field semantics
/// - `name`: label attached to every log line of this trigger/queue
/// - `interval`: debounce window between the first request of a burst and the run
#[derive(Clone, Debug)]
pub struct Config {
    /// Name used in logs and in [`RuntimeError`](crate::RuntimeError) payloads.
    pub name: Cow<'static, str>,

    /// Debounce window.
    ///
    /// A `request_run()` issued while nothing is scheduled fires the command
    /// no earlier than `interval` later. Further requests inside that window
    /// ride along with the scheduled run.
    pub interval: Duration,
}

impl Config {
    /// Creates a configuration with the default name and the given interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the debounce window as an `Option`.
    ///
    /// - `None` → no debounce
    /// - `Some(d)` → runs are delayed by `d`
    #[inline]
    pub fn debounce(&self) -> Option<Duration> {
        if self.interval == Duration::ZERO {
            None
        } else {
            Some(self.interval)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `name = "quantized"`
    /// - `interval = 1s`
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("quantized"),
            interval: Duration::from_secs(1),
        }
    }
}
