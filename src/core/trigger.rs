//! # Trigger: debounced single-consumer executor.
//!
//! A [`Trigger`] owns one consumer task that re-runs a [`Command`](crate::Command)
//! whenever a request is satisfied. Requests are coalesced: however many
//! arrive while a run is pending, the command runs once.
//!
//! ## Request semantics
//! ```text
//! request_run()               NotRunning ─CAS─► Scheduled, push(now + interval)
//!                             Scheduled | RunImmediately → no-op
//!
//! request_run_immediately()   any ─swap─► RunImmediately, push(now)
//!                             (no push if it already was RunImmediately)
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use quantized::{CommandError, CommandFn, Config, Trigger};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let cmd = CommandFn::arc("reload", |_ctx: CancellationToken| async {
//!         println!("reloading");
//!         Ok::<_, CommandError>(())
//!     });
//!     let trigger = Trigger::new(Config::with_interval(Duration::from_millis(50)), cmd);
//!
//!     trigger.request_run();
//!     trigger.request_run(); // rides along with the first request
//!     tokio::time::sleep(Duration::from_millis(100)).await;
//!
//!     trigger.shutdown();
//!     trigger.join().await;
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::commands::CommandRef;
use crate::config::Config;
use crate::core::state::RunState;
use crate::core::wakeup::{self, WakeupSender};
use crate::core::worker::{Shared, Worker};
use crate::error::CommandError;

/// Upper bound for a debounced deadline; roughly 30 years.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Debounced executor with a single dedicated consumer task.
///
/// ### Rules
/// - The command never runs concurrently with itself.
/// - A run happens no earlier than `interval` after the first request of a burst,
///   unless an immediate run was requested.
/// - A command failure stops the trigger for good; see [`Trigger::failure`].
///
/// Dropping the trigger stops the consumer.
pub struct Trigger {
    debounce: Option<Duration>,
    shared: Arc<Shared>,
    wakeups: WakeupSender,
    started: AtomicBool,
    token: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Trigger {
    /// Creates the trigger and spawns its consumer.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(cfg: Config, command: CommandRef) -> Self {
        let (wakeups, receiver) = wakeup::channel();
        let shared = Arc::new(Shared::new(cfg.name.clone().into_owned()));
        let token = CancellationToken::new();

        let worker = Worker {
            command,
            shared: Arc::clone(&shared),
            wakeups: receiver,
            token: token.clone(),
        };
        let handle = tokio::spawn(worker.run());

        Self {
            debounce: cfg.debounce(),
            shared,
            wakeups,
            started: AtomicBool::new(true),
            token,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Requests a debounced run.
    ///
    /// Only the call that finds the trigger idle schedules a wake-up; every other
    /// call is satisfied by that pending run.
    pub fn request_run(&self) {
        if self.is_shutdown() {
            return;
        }
        if self.shared.state.try_schedule() {
            self.push(self.deadline());
        }
    }

    /// Requests a run as soon as the consumer is free, overriding any debounce wait.
    pub fn request_run_immediately(&self) {
        if self.is_shutdown() {
            return;
        }
        if self.shared.state.force_immediate() != RunState::RunImmediately {
            self.push(Instant::now());
        }
    }

    /// Stops the consumer. Idempotent.
    ///
    /// Returns `true` only for the call that actually performed the shutdown.
    /// A command already running is allowed to finish; it sees its token cancelled.
    pub fn shutdown(&self) -> bool {
        if self
            .started
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        debug!(trigger = %self.shared.name, "shutdown requested");
        self.token.cancel();
        true
    }

    /// Waits for the consumer task to exit.
    ///
    /// Returns immediately if another caller already joined it.
    pub async fn join(&self) {
        let handle = self.handle.lock().take();
        if let Some(h) = handle {
            let _ = h.await;
        }
    }

    /// Returns `true` while the command is executing.
    ///
    /// Observability only: the answer may be stale by the time it is read.
    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    /// Returns `false` once the consumer has exited (shutdown, drop or failure).
    pub fn is_alive(&self) -> bool {
        self.shared.alive.load(Ordering::Acquire)
    }

    /// Returns `true` after [`Trigger::shutdown`].
    pub fn is_shutdown(&self) -> bool {
        !self.started.load(Ordering::Acquire)
    }

    /// The failure that stopped the consumer, if any.
    pub fn failure(&self) -> Option<CommandError> {
        self.shared.failure.lock().clone()
    }

    /// Current scheduling state.
    pub fn run_state(&self) -> RunState {
        self.shared.state.load()
    }

    /// Configured debounce window.
    pub fn interval(&self) -> Duration {
        self.debounce.unwrap_or(Duration::ZERO)
    }

    /// Name from the configuration.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Fire instant for a debounced request made now.
    ///
    /// Windows too large to represent saturate to [`FAR_FUTURE`] ahead of now.
    fn deadline(&self) -> Instant {
        let now = Instant::now();
        match self.debounce {
            None => now,
            Some(d) => now
                .checked_add(d)
                .or_else(|| now.checked_add(FAR_FUTURE))
                .unwrap_or(now),
        }
    }

    fn push(&self, at: Instant) {
        if !self.wakeups.push(at) {
            debug!(trigger = %self.shared.name, "wake-up dropped; consumer is gone");
        }
    }
}

impl Drop for Trigger {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use tokio::sync::mpsc;
    use tokio::time;

    use super::*;
    use crate::commands::CommandFn;
    use crate::core::wakeup::WakeupReceiver;

    /// Command that reports the instant of every run.
    fn recording() -> (CommandRef, mpsc::UnboundedReceiver<Instant>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cmd = CommandFn::arc("record", move |_ctx: CancellationToken| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(Instant::now());
                Ok::<(), CommandError>(())
            }
        });
        (cmd, rx)
    }

    fn cfg(ms: u64) -> Config {
        Config::with_interval(Duration::from_millis(ms)).with_name("test")
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_once_after_interval() {
        let (cmd, mut runs) = recording();
        let trigger = Trigger::new(cfg(100), cmd);

        let first = Instant::now();
        trigger.request_run();
        time::sleep(Duration::from_millis(30)).await;
        trigger.request_run();
        time::sleep(Duration::from_millis(30)).await;
        trigger.request_run();

        let ran_at = runs.recv().await.unwrap();
        assert!(ran_at >= first + Duration::from_millis(100));

        time::sleep(Duration::from_secs(1)).await;
        assert!(runs.try_recv().is_err(), "burst must collapse into one run");
        assert_eq!(trigger.run_state(), RunState::NotRunning);
    }

    /// Trigger without a consumer; the test owns the wake-up receiver.
    fn detached(cfg: Config) -> (Trigger, WakeupReceiver) {
        let (wakeups, receiver) = wakeup::channel();
        let trigger = Trigger {
            debounce: cfg.debounce(),
            shared: Arc::new(Shared::new(cfg.name.into_owned())),
            wakeups,
            started: AtomicBool::new(true),
            token: CancellationToken::new(),
            handle: Mutex::new(None),
        };
        (trigger, receiver)
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_requests_enqueue_single_wakeup() {
        let (trigger, mut wakeups) = detached(cfg(1_000));

        for _ in 0..10 {
            trigger.request_run();
        }
        assert_eq!(trigger.run_state(), RunState::Scheduled);
        assert_eq!(wakeups.pending(), 1);

        trigger.request_run_immediately();
        trigger.request_run_immediately();
        trigger.request_run();
        assert_eq!(trigger.run_state(), RunState::RunImmediately);
        assert_eq!(wakeups.pending(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_overrides_debounce() {
        let (cmd, mut runs) = recording();
        let trigger = Trigger::new(cfg(10_000), cmd);

        let start = Instant::now();
        trigger.request_run();
        trigger.request_run_immediately();

        let ran_at = runs.recv().await.unwrap();
        assert!(ran_at < start + Duration::from_millis(10_000));

        // the stale debounced wake-up was discarded with the immediate one
        time::sleep(Duration::from_secs(20)).await;
        assert!(runs.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_during_run_is_not_lost() {
        let runs = Arc::new(AtomicUsize::new(0));
        let (started_tx, mut started_rx) = mpsc::unbounded_channel::<()>();
        let counter = Arc::clone(&runs);
        let cmd = CommandFn::arc("slow", move |_ctx: CancellationToken| {
            let counter = Arc::clone(&counter);
            let started_tx = started_tx.clone();
            async move {
                let _ = started_tx.send(());
                time::sleep(Duration::from_millis(500)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), CommandError>(())
            }
        });
        let trigger = Trigger::new(cfg(100), cmd);

        trigger.request_run();
        started_rx.recv().await.unwrap();
        assert!(trigger.is_active());
        trigger.request_run();

        started_rx.recv().await.unwrap();
        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert!(!trigger.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_runs_promptly() {
        let (cmd, mut runs) = recording();
        let trigger = Trigger::new(cfg(0), cmd);
        assert_eq!(trigger.interval(), Duration::ZERO);

        let start = Instant::now();
        trigger.request_run();
        let ran_at = runs.recv().await.unwrap();
        assert!(ran_at - start < Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_interval_waits_for_force() {
        let (cmd, mut runs) = recording();
        let trigger = Trigger::new(Config::with_interval(Duration::MAX), cmd);
        assert_eq!(trigger.interval(), Duration::MAX);

        trigger.request_run();
        assert_eq!(trigger.run_state(), RunState::Scheduled);
        time::sleep(Duration::from_secs(3_600)).await;
        assert!(runs.try_recv().is_err());

        trigger.request_run_immediately();
        assert!(runs.recv().await.is_some());
        assert!(trigger.is_alive());
    }

    #[test]
    fn test_deadline_saturates_on_overflow() {
        let (trigger, _wakeups) = detached(Config::with_interval(Duration::MAX));
        let now = Instant::now();
        let at = trigger.deadline();
        assert!(at >= now + FAR_FUTURE);

        let (trigger, _wakeups) = detached(cfg(0));
        assert!(trigger.deadline() <= Instant::now());
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent_and_stops_worker() {
        let (cmd, mut runs) = recording();
        let trigger = Trigger::new(cfg(10), cmd);

        assert!(trigger.shutdown());
        assert!(!trigger.shutdown());
        trigger.join().await;

        assert!(!trigger.is_alive());
        assert!(trigger.is_shutdown());
        assert!(trigger.failure().is_none());

        trigger.request_run();
        trigger.request_run_immediately();
        assert!(runs.recv().await.is_none(), "command must never have run");
    }

    #[tokio::test]
    async fn test_failure_is_fatal() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cmd = CommandFn::arc("broken", move |_ctx: CancellationToken| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(CommandError::fail("boom"))
            }
        });
        let trigger = Trigger::new(cfg(0), cmd);

        trigger.request_run_immediately();
        trigger.join().await;

        assert!(!trigger.is_alive());
        assert_eq!(trigger.failure(), Some(CommandError::fail("boom")));

        trigger.request_run_immediately();
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_panic_is_fatal() {
        let cmd = CommandFn::arc("panics", |_ctx: CancellationToken| async {
            let explode = true;
            if explode {
                panic!("kaboom");
            }
            Ok::<(), CommandError>(())
        });
        let trigger = Trigger::new(cfg(0), cmd);

        trigger.request_run();
        trigger.join().await;

        assert_eq!(
            trigger.failure(),
            Some(CommandError::Panicked {
                info: "kaboom".into()
            })
        );
    }

    #[tokio::test]
    async fn test_command_sees_cancellation_on_shutdown() {
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel::<bool>();
        let (started_tx, mut started_rx) = mpsc::unbounded_channel::<()>();
        let cmd = CommandFn::arc("cooperative", move |ctx: CancellationToken| {
            let seen_tx = seen_tx.clone();
            let started_tx = started_tx.clone();
            async move {
                let _ = started_tx.send(());
                ctx.cancelled().await;
                let _ = seen_tx.send(ctx.is_cancelled());
                Ok::<(), CommandError>(())
            }
        });
        let trigger = Trigger::new(cfg(0), cmd);

        trigger.request_run_immediately();
        started_rx.recv().await.unwrap();
        trigger.shutdown();
        trigger.join().await;

        assert_eq!(seen_rx.recv().await, Some(true));
        assert!(trigger.failure().is_none());
    }
}
