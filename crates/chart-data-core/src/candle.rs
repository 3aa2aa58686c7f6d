use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single normalized daily candlestick entry.
///
/// `timestamp` is midnight UTC of the trading day and is the sort key for
/// the series; `label` is the short human-readable date shown on the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub label: String,
    /// Open, high, low, close, in that order.
    pub ohlc: [f64; 4],
    pub timestamp: DateTime<Utc>,
}

impl CandlePoint {
    pub fn open(&self) -> f64 {
        self.ohlc[0]
    }

    pub fn high(&self) -> f64 {
        self.ohlc[1]
    }

    pub fn low(&self) -> f64 {
        self.ohlc[2]
    }

    pub fn close(&self) -> f64 {
        self.ohlc[3]
    }

    /// Epoch-millisecond sort key of this entry.
    pub fn epoch_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}
