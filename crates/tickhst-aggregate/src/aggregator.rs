//! Reduction of one bucket of ticks into a bar.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tickhst_types::Tick;

use crate::Bar;

/// Error returned by [`aggregate_checked`] for a batch that is not time-ordered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderingError {
    /// A tick is older than the tick before it.
    #[error("tick {index} at {timestamp} is older than the previous tick at {previous}")]
    OutOfOrder {
        /// Position of the offending tick in the batch.
        index: usize,
        /// Timestamp of the offending tick.
        timestamp: DateTime<Utc>,
        /// Timestamp of the tick before it.
        previous: DateTime<Utc>,
    },
}

/// Reduces a batch of ticks sharing one bucket into a single bar.
///
/// Returns `None` for an empty batch: empty buckets produce no bar.
///
/// Open is the first tick's bid and close the last tick's bid, so the caller
/// must supply ticks in ascending time order. The batch is not sorted or
/// checked; use [`aggregate_checked`] to reject out-of-order input.
///
/// Each tick contributes `floor(ask_volume + bid_volume)` to the volume.
#[must_use]
pub fn aggregate(bucket_start: i64, ticks: &[Tick]) -> Option<Bar> {
    let (first, rest) = ticks.split_first()?;
    let mut builder = BarBuilder::new(bucket_start, first);
    for tick in rest {
        builder.update(tick);
    }
    Some(builder.finish())
}

/// Like [`aggregate`], but fails if any tick is older than its predecessor.
///
/// # Errors
///
/// Returns [`OrderingError::OutOfOrder`] naming the first offending tick.
pub fn aggregate_checked(bucket_start: i64, ticks: &[Tick]) -> Result<Option<Bar>, OrderingError> {
    if let Some(index) = ticks
        .windows(2)
        .position(|pair| pair[1].timestamp < pair[0].timestamp)
    {
        return Err(OrderingError::OutOfOrder {
            index: index + 1,
            timestamp: ticks[index + 1].timestamp,
            previous: ticks[index].timestamp,
        });
    }
    Ok(aggregate(bucket_start, ticks))
}

/// Whole units of a tick's combined volume; negative or NaN volumes count as zero.
fn whole_volume(tick: &Tick) -> u64 {
    tick.total_volume().floor() as u64
}

/// Builder for bars.
#[derive(Debug)]
struct BarBuilder {
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    tick_count: u32,
}

impl BarBuilder {
    /// Creates a new builder from the first tick.
    fn new(time: i64, tick: &Tick) -> Self {
        Self {
            time,
            open: tick.bid,
            high: tick.bid,
            low: tick.bid,
            close: tick.bid,
            volume: whole_volume(tick),
            tick_count: 1,
        }
    }

    /// Updates the builder with a new tick.
    fn update(&mut self, tick: &Tick) {
        self.high = self.high.max(tick.bid);
        self.low = self.low.min(tick.bid);
        self.close = tick.bid;
        self.volume = self.volume.saturating_add(whole_volume(tick));
        self.tick_count = self.tick_count.saturating_add(1);
    }

    /// Finishes building and returns the bar.
    const fn finish(self) -> Bar {
        Bar::new(
            self.time,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.tick_count,
        )
    }
}
