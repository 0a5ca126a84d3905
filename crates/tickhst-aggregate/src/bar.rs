//! OHLCV bar data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar aggregated from the ticks of one bucket.
///
/// Prices come from the bid side of each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bucket start time in seconds since the Unix epoch.
    pub time: i64,
    /// Opening price (first tick's bid).
    pub open: f64,
    /// Highest bid during the period.
    pub high: f64,
    /// Lowest bid during the period.
    pub low: f64,
    /// Closing price (last tick's bid).
    pub close: f64,
    /// Tick volume, the sum of each tick's whole ask + bid volume.
    pub volume: u64,
    /// Number of ticks in the bar.
    pub tick_count: u32,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        tick_count: u32,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
            tick_count,
        }
    }

    /// Returns the bucket start as a UTC timestamp, if representable.
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.time, 0)
    }

    /// Returns true if all prices are finite and `low <= open, close <= high`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        prices.iter().all(|p| p.is_finite())
            && self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) bar.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}
