//! Candle record as served by the feed
//!
//! The feed is trusted but untyped: prices and volumes arrive either as
//! JSON numbers or as strings, and any field may be absent. Every field is
//! therefore kept as a loose JSON value and only turned into text when a
//! table cell is rendered.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Cell Value
// =============================================================================

/// A single field of a candle record, kept exactly as the feed sent it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellValue(Value);

impl CellValue {
    pub fn is_missing(&self) -> bool {
        self.0.is_null()
    }
}

impl fmt::Display for CellValue {
    /// Plain text for a table cell.
    ///
    /// Strings are written without quotes, numbers keep the textual form the
    /// feed used, and missing values render as an empty cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            other => write!(f, "{}", other),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

// =============================================================================
// Candle Record
// =============================================================================

/// One OHLCV observation for a market
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandleRecord {
    #[serde(default)]
    pub market: CellValue,
    #[serde(default, rename = "candle_date_time_utc")]
    pub timestamp: CellValue,
    #[serde(default, rename = "opening_price")]
    pub open: CellValue,
    #[serde(default, rename = "high_price")]
    pub high: CellValue,
    #[serde(default, rename = "low_price")]
    pub low: CellValue,
    #[serde(default, rename = "trade_price")]
    pub close: CellValue,
    #[serde(default, rename = "candle_acc_trade_volume")]
    pub volume: CellValue,
    #[serde(default)]
    pub source: CellValue,
}

impl CandleRecord {
    /// Key used to group records into per-market tables
    pub fn market_key(&self) -> String {
        self.market.to_string()
    }

    /// Table cells in display order: time, open, high, low, close, volume, source
    pub fn cells(&self) -> [String; 7] {
        [
            self.timestamp.to_string(),
            self.open.to_string(),
            self.high.to_string(),
            self.low.to_string(),
            self.close.to_string(),
            self.volume.to_string(),
            self.source.to_string(),
        ]
    }
}
