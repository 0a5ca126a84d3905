//! Tick data representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tick representing a price update.
///
/// Volumes are expressed in millions of units of the base currency and may be
/// fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Instrument symbol (e.g. `EURUSD`).
    pub symbol: String,
    /// Timestamp of the tick (UTC, millisecond precision).
    pub timestamp: DateTime<Utc>,
    /// Ask (offer) price.
    pub ask: f64,
    /// Bid price.
    pub bid: f64,
    /// Volume available at the ask price.
    pub ask_volume: f64,
    /// Volume available at the bid price.
    pub bid_volume: f64,
}

impl Tick {
    /// `chrono` format string of the timestamp column produced by [`Tick::to_row`].
    pub const ROW_TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S%.3f";

    /// Creates a new tick.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        ask: f64,
        bid: f64,
        ask_volume: f64,
        bid_volume: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            ask,
            bid,
            ask_volume,
            bid_volume,
        }
    }

    /// Creates a tick from a millisecond Unix timestamp.
    ///
    /// Returns `None` if the timestamp is outside the representable range.
    #[must_use]
    pub fn from_millis(
        symbol: impl Into<String>,
        millis: i64,
        ask: f64,
        bid: f64,
        ask_volume: f64,
        bid_volume: f64,
    ) -> Option<Self> {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)?;
        Some(Self::new(symbol, timestamp, ask, bid, ask_volume, bid_volume))
    }

    /// Returns the timestamp as milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// Returns the timestamp as whole seconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Returns the mid price (average of ask and bid).
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.ask + self.bid) / 2.0
    }

    /// Returns the spread (ask - bid).
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    /// Returns the total volume (ask + bid volume).
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.ask_volume + self.bid_volume
    }

    /// Formats the tick as a row of strings for diagnostic export.
    ///
    /// Columns are timestamp (`YYYY-MM-DD HH:MM:SS.mmm`, UTC), ask and bid with
    /// five decimals, then ask and bid volume with two decimals.
    #[must_use]
    pub fn to_row(&self) -> [String; 5] {
        [
            self.timestamp.format(Self::ROW_TIMESTAMP_FORMAT).to_string(),
            format!("{:.5}", self.ask),
            format!("{:.5}", self.bid),
            format!("{:.2}", self.ask_volume),
            format!("{:.2}", self.bid_volume),
        ]
    }
}
