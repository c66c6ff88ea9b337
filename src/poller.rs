//! Poller engine (component G): drives one source's IDLE -> AUTH -> FETCH
//! -> SLEEP -> IDLE cycle, with SLEEP -> EXIT once requested. The
//! cancellable wait is modeled on the original's POSIX `sem_timedwait`
//! against an exit semaphore; `tokio::sync::Notify` plus a sticky
//! `AtomicBool` reproduce the same "wake early on exit, otherwise time
//! out" semantics without blocking a thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{error, info};

use crate::client::ZabbixClient;
use crate::status::StatusBoard;
use crate::store::{NormalizedStore, RawCache};
use crate::update::run_updates;

/// Fallback suspension used only if the wall-clock/timer source itself
/// misbehaves (the `sleep` future never drives its waker, say).
const BURNUP_SAFETY_SLEEP: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ExitSignal {
    requested: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ExitSignal {
    pub fn new() -> Self {
        Self { requested: Arc::new(AtomicBool::new(false)), notify: Arc::new(Notify::new()) }
    }

    /// Idempotent: a redundant call is a no-op beyond the flag already
    /// being set.
    pub fn request_exit(&self) {
        self.requested.store(true, Ordering::SeqCst);
        // `notify_one` (unlike `notify_waiters`) stores a permit when
        // called before anyone is `notified().await`-ing, so a
        // `request_exit()` racing the window between our own
        // `is_requested()` check and the `select!` below is not lost.
        self.notify.notify_one();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Suspends for `duration`, returning early the moment
    /// [`ExitSignal::request_exit`] is called.
    async fn cancellable_sleep(&self, duration: Duration) {
        if self.is_requested() {
            return;
        }
        // A zero or otherwise degenerate duration would busy-loop the
        // cycle; fall back to the burnup-safety interval instead.
        let duration = if duration.is_zero() { BURNUP_SAFETY_SLEEP } else { duration };
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = self.notify.notified() => {}
        }
    }
}

impl Default for ExitSignal {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Poller<R, N> {
    source_id: String,
    client: ZabbixClient,
    raw: R,
    norm: N,
    poll_interval: Duration,
    retry_interval: Duration,
    exit: ExitSignal,
    status: StatusBoard,
}

impl<R, N> Poller<R, N>
where
    R: RawCache,
    N: NormalizedStore,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(source_id: impl Into<String>, client: ZabbixClient, raw: R, norm: N, poll_interval: Duration, retry_interval: Duration, exit: ExitSignal, status: StatusBoard) -> Self {
        Self { source_id: source_id.into(), client, raw, norm, poll_interval, retry_interval, exit, status }
    }

    pub fn exit_signal(&self) -> ExitSignal {
        self.exit.clone()
    }

    /// Runs cycles until exit is requested. Never returns `Err` — a
    /// failed cycle is logged and retried, per the never-fatal
    /// propagation policy; the engine itself only stops on
    /// `request_exit()`.
    pub async fn run(mut self) {
        loop {
            if self.exit.is_requested() {
                info!(source = %self.source_id, "poller exiting");
                return;
            }

            let sleep_for = match self.run_cycle().await {
                Ok(()) => {
                    self.status.record_success(&self.source_id).await;
                    self.poll_interval
                }
                Err(e) => {
                    error!(source = %self.source_id, error = %e, "cycle failed, will retry");
                    self.status.record_failure(&self.source_id, &e).await;
                    self.retry_interval
                }
            };

            if self.exit.is_requested() {
                info!(source = %self.source_id, "poller exiting");
                return;
            }

            self.exit.cancellable_sleep(sleep_for).await;
        }
    }

    async fn run_cycle(&mut self) -> Result<(), crate::error::FetchError> {
        self.client.open_session().await?;
        run_updates(&self.client, &self.raw, &self.norm, &self.source_id).await
    }
}
