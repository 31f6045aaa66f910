//! Candle feed clients

mod feed;

pub use feed::{decode_candles, CandleSource, FeedError, HttpCandleSource, Result, DATA_PATH};
