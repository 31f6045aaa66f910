//! Shared runner for the board binaries
//!
//! Wraps a binary's main loop with start and stop banners. The stop banner
//! carries whatever final status line the binary reports.

use std::time::Duration;
use tracing::info;

/// Name and heartbeat settings of a binary
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Shown in the start and stop banners
    pub name: String,
    /// Seconds between poll stats summaries
    pub heartbeat_interval_secs: u64,
}

impl RunConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            heartbeat_interval_secs: 60,
        }
    }

    pub fn with_heartbeat(mut self, secs: u64) -> Self {
        self.heartbeat_interval_secs = secs;
        self
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }
}

/// A binary that runs until asked to stop
pub trait BinaryRunner {
    /// Main loop; returns once shutdown was requested
    async fn run(&mut self) -> anyhow::Result<()>;

    fn config(&self) -> &RunConfig;

    /// Final status line for the stop banner, if the binary has one
    fn final_stats(&self) -> Option<String> {
        None
    }

    fn print_banner(&self) {
        let config = self.config();
        info!("");
        info!("========================================");
        info!("Starting {}", config.name);
        info!("Press Ctrl+C to stop");
        info!("========================================");
        info!("");
    }

    fn print_shutdown(&self, stats: Option<&str>) {
        let config = self.config();
        info!("");
        info!("========================================");
        info!("{} stopped gracefully", config.name);
        if let Some(stats) = stats {
            info!("{}", stats);
        }
        info!("========================================");
    }

    /// Banner, main loop, then the stop banner with [`final_stats`](Self::final_stats)
    async fn execute(&mut self) -> anyhow::Result<()> {
        self.print_banner();
        let result = self.run().await;
        let stats = self.final_stats();
        self.print_shutdown(stats.as_deref());
        result
    }
}
