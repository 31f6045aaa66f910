//! Candle Board
//!
//! Polls a candle feed over HTTP and renders one table per market.
//!
//! ## Layout
//!
//! - **domain**: candle records and the group-by-market partition
//! - **render**: pure render plans plus the targets that display them
//! - **client**: HTTP feed client
//! - **poller**: the owned polling task with its start/stop lifecycle
//! - **config**: YAML/env configuration
//! - **viewer**: terminal UI over the same render plans
//! - **utils**: tracing, shutdown and heartbeat helpers

pub mod client;
pub mod config;
pub mod domain;
pub mod poller;
pub mod render;
pub mod utils;
pub mod viewer;

// Re-export commonly used items
pub use client::{CandleSource, FeedError, HttpCandleSource, DATA_PATH};
pub use config::{BoardConfig, ConfigError};
pub use domain::{group_by_market, CandleRecord, CellValue, MarketGroup, MarketGroups};
pub use poller::{CandlePoller, CycleOutcome, PollStats, PollerHandle, SharedPollStats, POLL_INTERVAL};
pub use render::{
    build_render_plan, HtmlFileTarget, HtmlPage, MarketTable, MemoryBoard, RenderError,
    RenderPlan, RenderTarget, TableRow, COLUMN_HEADERS,
};
pub use utils::{init_tracing, Heartbeat, ShutdownManager};
