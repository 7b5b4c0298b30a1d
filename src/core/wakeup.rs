//! # Delay-ordered wake-up queue.
//!
//! Producers push absolute fire instants through an unbounded channel (never
//! blocks, callable from any thread). The consumer keeps them in a min-heap and
//! sleeps until the earliest one is due.
//!
//! ```text
//! request_run()            ─► push(now + interval) ─┐
//! request_run_immediately() ─► push(now)           ─┼─► [mpsc] ─► heap ─► next_due()
//! ```
//!
//! The heap may hold stale entries; [`WakeupReceiver::clear`] discards all of
//! them after a wake.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tokio::sync::mpsc;
use tokio::time::{self, Instant};

/// Producer half. Dropping every sender ends the consumer loop.
#[derive(Debug)]
pub struct WakeupSender {
    tx: mpsc::UnboundedSender<Instant>,
}

impl WakeupSender {
    /// Enqueues a wake-up due at `at`.
    ///
    /// Returns `false` if the consumer is gone.
    pub fn push(&self, at: Instant) -> bool {
        self.tx.send(at).is_ok()
    }
}

/// Consumer half, owned by the worker.
#[derive(Debug)]
pub struct WakeupReceiver {
    rx: mpsc::UnboundedReceiver<Instant>,
    heap: BinaryHeap<Reverse<Instant>>,
}

/// Creates a connected sender/receiver pair.
pub fn channel() -> (WakeupSender, WakeupReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        WakeupSender { tx },
        WakeupReceiver {
            rx,
            heap: BinaryHeap::new(),
        },
    )
}

impl WakeupReceiver {
    /// Waits until the earliest pending wake-up is due and pops it.
    ///
    /// Returns `None` once all senders are dropped.
    pub async fn next_due(&mut self) -> Option<Instant> {
        loop {
            let Some(Reverse(at)) = self.heap.peek().copied() else {
                let at = self.rx.recv().await?;
                self.heap.push(Reverse(at));
                continue;
            };

            tokio::select! {
                _ = time::sleep_until(at) => {
                    self.heap.pop();
                    return Some(at);
                }
                next = self.rx.recv() => {
                    self.heap.push(Reverse(next?));
                }
            }
        }
    }

    /// Discards every pending wake-up, queued or in flight.
    pub fn clear(&mut self) {
        while self.rx.try_recv().is_ok() {}
        self.heap.clear();
    }

    /// Number of wake-ups currently known to the consumer.
    #[cfg(test)]
    pub fn pending(&mut self) -> usize {
        while let Ok(at) = self.rx.try_recv() {
            self.heap.push(Reverse(at));
        }
        self.heap.len()
    }
}
