//! Candle Viewer
//!
//! Terminal UI showing the same render plans as the HTML board.
//! The poller renders into a [`MemoryBoard`](crate::render::MemoryBoard)
//! and the UI reads from it on every frame.

pub mod app;
pub mod ui;

pub use app::ViewerApp;
