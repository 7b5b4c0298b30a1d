//! # Example: config_reload
//!
//! Several watchers report "file changed" for overlapping files within one
//! debounce window. The queue merges the duplicates and keeps the newest
//! revision of each file.
//!
//! ## Flow
//! ```text
//! watcher threads ──► post_event(FileChanged{path, rev}) ──► pending
//!                                                              │ 200ms window
//!                                                              ▼
//!                     coalesce: one FileChanged per path (latest rev)
//!                                                              ▼
//!                     process_event (re-read) ──► LogWriter ──► Applied counter
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example config_reload --features logging
//! ```

use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use quantized::{CommandError, Config, Event, EventQueue, Listener, LogWriter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct FileChanged {
    path: &'static str,
    rev: u64,
}

impl PartialEq for FileChanged {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FileChanged {}

impl Hash for FileChanged {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

#[async_trait]
impl Event for FileChanged {
    fn can_be_merged_with(&self, newer: &Self) -> bool {
        newer.rev >= self.rev
    }

    async fn process_event(&self) -> Result<(), CommandError> {
        println!("[reload] {} @ rev {}", self.path, self.rev);
        Ok(())
    }
}

#[derive(Default)]
struct Applied(AtomicU64);

#[async_trait]
impl Listener<FileChanged> for Applied {
    async fn event_processed(&self, _event: &FileChanged) -> Result<(), CommandError> {
        self.0.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "applied"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = Config::with_interval(Duration::from_millis(200)).with_name("config");
    let queue = Arc::new(EventQueue::new(cfg));
    let applied = Arc::new(Applied::default());
    queue.add_listener(Arc::new(LogWriter::new()));
    queue.add_listener(applied.clone());

    let watchers: Vec<_> = ["app.toml", "db.toml", "app.toml"]
        .into_iter()
        .map(|path| {
            let queue = Arc::clone(&queue);
            tokio::task::spawn_blocking(move || {
                for rev in 1..=5 {
                    queue.post_event(FileChanged { path, rev })?;
                }
                Ok::<_, quantized::RuntimeError>(())
            })
        })
        .collect();
    for w in watchers {
        w.await??;
    }

    tokio::time::sleep(Duration::from_millis(400)).await;
    println!("applied {} reloads for 15 signals", applied.0.load(Ordering::Relaxed));

    queue.shutdown();
    queue.join().await;
    Ok(())
}
