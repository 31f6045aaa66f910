//! Domain types: candle records and market grouping

mod candle;
mod grouping;

pub use candle::{CandleRecord, CellValue};
pub use grouping::{group_by_market, MarketGroup, MarketGroups};
