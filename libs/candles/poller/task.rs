//! The owned polling task

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::client::CandleSource;
use crate::render::{build_render_plan, RenderTarget};
use crate::utils::Heartbeat;

use super::stats::{PollStats, SharedPollStats};

/// Fixed period between poll cycles
pub const POLL_INTERVAL: Duration = Duration::from_millis(5000);

const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

/// Result of a single poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Target now shows `markets` tables built from `records` records
    Rendered { records: usize, markets: usize },
    /// Fetch or decode failed; target untouched
    FetchFailed,
    /// Plan built but the target could not show it
    RenderFailed,
}

// =============================================================================
// Poller
// =============================================================================

/// Fetches candles from a source and shows them on a target
pub struct CandlePoller {
    source: Arc<dyn CandleSource>,
    target: Arc<dyn RenderTarget>,
    stats: SharedPollStats,
    heartbeat_interval: Duration,
}

impl CandlePoller {
    pub fn new(source: Arc<dyn CandleSource>, target: Arc<dyn RenderTarget>) -> Self {
        Self {
            source,
            target,
            stats: Arc::new(RwLock::new(PollStats::default())),
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }

    /// How often the running task logs a stats summary
    pub fn with_heartbeat(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    pub fn stats(&self) -> SharedPollStats {
        Arc::clone(&self.stats)
    }

    /// Run one fetch -> group -> render cycle.
    ///
    /// Failures are logged and counted, never propagated: the target keeps
    /// whatever it showed before.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let records = match self.source.fetch_candles().await {
            Ok(records) => records,
            Err(e) => {
                error!("[Poller] Error fetching data: {}", e);
                self.stats.write().record_failure(&e);
                return CycleOutcome::FetchFailed;
            }
        };

        let plan = build_render_plan(&records);

        if let Err(e) = self.target.replace_contents(&plan) {
            error!("[Poller] Error rendering data: {}", e);
            self.stats.write().record_failure(&e);
            return CycleOutcome::RenderFailed;
        }

        debug!(
            "[Poller] Rendered {} records across {} markets",
            records.len(),
            plan.market_count()
        );
        self.stats
            .write()
            .record_success(records.len(), plan.market_count());

        CycleOutcome::Rendered {
            records: records.len(),
            markets: plan.market_count(),
        }
    }

    /// Spawn the polling task on the current tokio runtime.
    ///
    /// One cycle runs right away; after that one runs every
    /// [`POLL_INTERVAL`]. Cycles never overlap.
    pub fn start(self) -> PollerHandle {
        let running = Arc::new(AtomicBool::new(true));
        let wake = Arc::new(Notify::new());
        let stats = self.stats();

        let task = tokio::spawn(self.run(Arc::clone(&running), Arc::clone(&wake)));

        PollerHandle {
            running,
            wake,
            stats,
            task: Some(task),
        }
    }

    async fn run(self, running: Arc<AtomicBool>, wake: Arc<Notify>) {
        info!(
            "[Poller] Started, polling every {}ms",
            POLL_INTERVAL.as_millis()
        );

        let mut heartbeat = Heartbeat::new(self.heartbeat_interval);
        let mut ticker = interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Startup cycle, independent of the timer
        self.run_cycle().await;

        while running.load(Ordering::Acquire) {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = wake.notified() => {
                    debug!("[Poller] Immediate poll requested");
                }
            }

            if !running.load(Ordering::Acquire) {
                break;
            }

            self.run_cycle().await;

            if heartbeat.should_beat() {
                info!("[Poller] {}", self.stats.read().summary());
                heartbeat.beat();
            }
        }
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Owner of a running poll task; dropping it stops the task
pub struct PollerHandle {
    running: Arc<AtomicBool>,
    wake: Arc<Notify>,
    stats: SharedPollStats,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn stats(&self) -> SharedPollStats {
        Arc::clone(&self.stats)
    }

    /// Run a cycle now instead of waiting for the next tick
    pub fn poll_now(&self) {
        self.wake.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
            && self.task.as_ref().map_or(false, |t| !t.is_finished())
    }

    /// Stop polling and wait for the task to end.
    ///
    /// A fetch still in flight is dropped.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Release);

        if let Some(task) = self.task.take() {
            task.abort();
            match task.await {
                Ok(()) => {}
                Err(e) if e.is_cancelled() => {}
                Err(e) => warn!("[Poller] Task ended abnormally: {}", e),
            }
        }

        info!("[Poller] Stopped ({})", self.stats.read().summary());
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.running.store(false, Ordering::Release);
            task.abort();
        }
    }
}
