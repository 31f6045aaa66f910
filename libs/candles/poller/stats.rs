//! Poll cycle statistics

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Counters for the poller's cycles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollStats {
    pub cycles: u64,
    pub successes: u64,
    pub failures: u64,
    /// Message of the most recent failed cycle
    pub last_error: Option<String>,
    pub last_record_count: usize,
    pub last_market_count: usize,
    pub last_success_at: Option<DateTime<Utc>>,
}

pub type SharedPollStats = Arc<RwLock<PollStats>>;

impl PollStats {
    pub fn record_success(&mut self, records: usize, markets: usize) {
        self.cycles += 1;
        self.successes += 1;
        self.last_record_count = records;
        self.last_market_count = markets;
        self.last_success_at = Some(Utc::now());
    }

    pub fn record_failure(&mut self, error: &impl Display) {
        self.cycles += 1;
        self.failures += 1;
        self.last_error = Some(error.to_string());
    }

    /// One-line status for heartbeat logs and the viewer header
    pub fn summary(&self) -> String {
        let last = self
            .last_success_at
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());

        format!(
            "cycles={} ok={} failed={} markets={} records={} last_ok={}",
            self.cycles,
            self.successes,
            self.failures,
            self.last_market_count,
            self.last_record_count,
            last
        )
    }
}
