//! # Example: force_flush
//!
//! A queue with a very long debounce window, flushed on demand with
//! `force_queue()`, plus pause/resume around a maintenance section.
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example force_flush
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quantized::{CommandError, Config, Event, EventQueue, Listener};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Flush(u32);

#[async_trait]
impl Event for Flush {
    fn can_be_merged_with(&self, _newer: &Self) -> bool {
        true
    }

    async fn process_event(&self) -> Result<(), CommandError> {
        Ok(())
    }
}

struct Done(mpsc::UnboundedSender<Flush>);

#[async_trait]
impl Listener<Flush> for Done {
    async fn event_processed(&self, event: &Flush) -> Result<(), CommandError> {
        self.0
            .send(*event)
            .map_err(|e| CommandError::fail(e.to_string()))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = Config::with_interval(Duration::from_secs(3600)).with_name("flush");
    let queue = EventQueue::new(cfg);
    let (tx, mut rx) = mpsc::unbounded_channel();
    queue.add_listener(Arc::new(Done(tx)));

    queue.pause_queue();
    queue.post_events([Flush(1), Flush(2)])?;
    queue.force_queue(); // paused: the pass is skipped
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("[paused] pending={}", queue.size());

    queue.resume_queue()?;
    queue.force_queue();
    for _ in 0..2 {
        if let Some(f) = rx.recv().await {
            println!("[flushed] {f:?}");
        }
    }

    queue.shutdown();
    queue.join().await;
    Ok(())
}
