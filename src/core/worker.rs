//! # Worker: the trigger's single consumer loop.
//!
//! ## Architecture
//! ```text
//! Trigger::new() ──► tokio::spawn(Worker::run())
//!
//! loop {
//!   ├─► wait for earliest due wake-up (cancellable)
//!   ├─► clear all other wake-ups
//!   ├─► state = NotRunning            (before the command: late requests re-arm)
//!   ├─► active = true
//!   ├─► command.run(child_token)      (panics caught)
//!   │       ├─ Ok  ──► continue
//!   │       └─ Err ──► log, record failure, exit (fail-stop)
//!   └─ exit conditions:
//!        - shutdown token cancelled
//!        - every wake-up sender dropped (trigger dropped)
//!        - command failure
//! }
//! ```
//!
//! ## Rules
//! - Runs are **sequential** (never concurrent).
//! - Any number of wake-ups due at once yields exactly **one** run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::FutureExt;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::commands::CommandRef;
use crate::core::state::AtomicRunState;
use crate::core::wakeup::WakeupReceiver;
use crate::error::CommandError;

/// State shared between the trigger handle and its worker.
#[derive(Debug)]
pub struct Shared {
    pub name: String,
    pub state: AtomicRunState,
    pub active: AtomicBool,
    pub alive: AtomicBool,
    pub failure: Mutex<Option<CommandError>>,
}

impl Shared {
    pub fn new(name: String) -> Self {
        Self {
            name,
            state: AtomicRunState::new(),
            active: AtomicBool::new(false),
            alive: AtomicBool::new(true),
            failure: Mutex::new(None),
        }
    }
}

/// Owns the consumer half of the trigger.
pub struct Worker {
    pub command: CommandRef,
    pub shared: Arc<Shared>,
    pub wakeups: WakeupReceiver,
    pub token: CancellationToken,
}

impl Worker {
    /// Runs until shutdown, trigger drop, or the first command failure.
    pub async fn run(mut self) {
        debug!(trigger = %self.shared.name, command = self.command.name(), "worker started");

        loop {
            let due = tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                due = self.wakeups.next_due() => due,
            };
            if due.is_none() {
                debug!(trigger = %self.shared.name, "wake-up channel closed");
                break;
            }

            self.wakeups.clear();
            self.shared.state.reset();

            if let Err(e) = self.run_command().await {
                error!(
                    trigger = %self.shared.name,
                    command = self.command.name(),
                    label = e.as_label(),
                    error = %e.as_message(),
                    "command failed; stopping trigger"
                );
                *self.shared.failure.lock() = Some(e);
                break;
            }
        }

        self.shared.alive.store(false, Ordering::Release);
        debug!(trigger = %self.shared.name, "worker stopped");
    }

    async fn run_command(&self) -> Result<(), CommandError> {
        self.shared.active.store(true, Ordering::Release);
        let fut = self.command.run(self.token.child_token());
        let res = std::panic::AssertUnwindSafe(fut).catch_unwind().await;
        self.shared.active.store(false, Ordering::Release);

        match res {
            Ok(r) => r,
            Err(panic_err) => Err(CommandError::Panicked {
                info: panic_message(&*panic_err),
            }),
        }
    }
}

fn panic_message(any: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_variants() {
        let s: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(panic_message(&*s), "static");
        let s: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(&*s), "owned");
        let s: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(&*s), "unknown panic");
    }
}
