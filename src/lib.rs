//! Candle Board - Main Library
//!
//! Re-exports the workspace libraries and the helpers shared by the
//! binaries.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **candles**: Polling, grouping and rendering (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use candle_board::bin_common::{load_config_from_env, ConfigType};
//! use candle_board::candles::{BoardConfig, CandlePoller};
//! ```

// Re-export workspace libraries for convenience
pub use candles;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{config_path_from_args, load_config_from_env, parse_args, ConfigType};
    pub use runner::{BinaryRunner, RunConfig};
}
