//! Error types used by the trigger, the event queue and user callbacks.
//!
//! This module defines two main error enums:
//!
//! - [`RuntimeError`] — precondition violations reported at the call site.
//! - [`CommandError`] — failures raised by commands, events and listeners.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging.

use thiserror::Error;

/// # Errors reported to callers of the trigger and queue APIs.
///
/// These are programming errors: they are returned immediately, never retried,
/// and leave the queue state unchanged.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// `resume_queue` was called more times than `pause_queue`.
    #[error("resume_queue called without a matching pause_queue")]
    UnbalancedResume,

    /// The queue (or its trigger) has been shut down.
    #[error("queue {name:?} is shut down")]
    ShutDown {
        /// Name of the queue from its [`Config`](crate::Config).
        name: String,
    },

    /// The consumer stopped after a fatal command failure and will never run again.
    #[error("consumer of {name:?} is dead: {reason}")]
    WorkerDead {
        /// Name of the queue from its [`Config`](crate::Config).
        name: String,
        /// Failure that stopped the consumer.
        reason: String,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use quantized::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::UnbalancedResume.as_label(), "runtime_unbalanced_resume");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::UnbalancedResume => "runtime_unbalanced_resume",
            RuntimeError::ShutDown { .. } => "runtime_shut_down",
            RuntimeError::WorkerDead { .. } => "runtime_worker_dead",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::UnbalancedResume => "pause count would drop below zero".to_string(),
            RuntimeError::ShutDown { name } => format!("shut down: {name}"),
            RuntimeError::WorkerDead { name, reason } => format!("dead: {name}; cause={reason}"),
        }
    }
}

/// # Errors produced by a command, an event or a listener.
///
/// Every variant is fatal for the consumer that observed it: the failure is
/// logged and the trigger stops for good.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The callback returned an error.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The callback panicked.
    #[error("panicked: {info}")]
    Panicked {
        /// Panic payload, if it was a string.
        info: String,
    },
}

impl CommandError {
    /// Shorthand for [`CommandError::Fail`].
    ///
    /// # Example
    /// ```
    /// use quantized::CommandError;
    ///
    /// let err = CommandError::fail("config file vanished");
    /// assert_eq!(err.to_string(), "execution failed: config file vanished");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        CommandError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            CommandError::Fail { .. } => "command_failed",
            CommandError::Panicked { .. } => "command_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            CommandError::Fail { error } => format!("error: {error}"),
            CommandError::Panicked { info } => format!("panic: {info}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(
            RuntimeError::ShutDown { name: "q".into() }.as_label(),
            "runtime_shut_down"
        );
        assert_eq!(
            RuntimeError::WorkerDead {
                name: "q".into(),
                reason: "boom".into()
            }
            .as_label(),
            "runtime_worker_dead"
        );
        assert_eq!(CommandError::fail("x").as_label(), "command_failed");
        assert_eq!(
            CommandError::Panicked { info: "x".into() }.as_label(),
            "command_panicked"
        );
    }

    #[test]
    fn test_messages_carry_context() {
        let err = RuntimeError::WorkerDead {
            name: "config".into(),
            reason: "boom".into(),
        };
        assert_eq!(err.as_message(), "dead: config; cause=boom");
        assert_eq!(
            err.to_string(),
            "consumer of \"config\" is dead: boom"
        );
        assert_eq!(CommandError::fail("boom").as_message(), "error: boom");
    }
}
