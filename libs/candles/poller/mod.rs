//! Poll scheduling
//!
//! [`CandlePoller`] owns one fetch -> render cycle. [`CandlePoller::start`]
//! moves it onto a tokio task that runs a cycle immediately and then every
//! [`POLL_INTERVAL`], until the returned [`PollerHandle`] is stopped.

mod stats;
mod task;

pub use stats::{PollStats, SharedPollStats};
pub use task::{CandlePoller, CycleOutcome, PollerHandle, POLL_INTERVAL};
