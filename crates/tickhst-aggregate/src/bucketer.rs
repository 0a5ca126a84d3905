//! Streaming grouping of ticks into per-bucket batches.

use tickhst_types::{Tick, bucket_start};

use crate::{Bar, aggregate};

/// The ticks of one bucket, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct TickBatch {
    /// Bucket start time in seconds since the Unix epoch.
    pub bucket_start: i64,
    /// The ticks in this batch.
    pub ticks: Vec<Tick>,
}

impl TickBatch {
    /// Creates a new tick batch.
    #[must_use]
    pub const fn new(bucket_start: i64, ticks: Vec<Tick>) -> Self {
        Self {
            bucket_start,
            ticks,
        }
    }

    /// Returns true if the batch is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Returns the number of ticks in the batch.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Reduces the batch into a bar.
    #[must_use]
    pub fn to_bar(&self) -> Option<Bar> {
        aggregate(self.bucket_start, &self.ticks)
    }
}

/// Streaming tick bucketer.
///
/// Groups a time-ordered tick stream into batches of `minutes`-wide buckets.
/// A batch is emitted as soon as a tick lands in a different bucket, so a tick
/// that goes back in time closes the current batch and opens a new one.
#[derive(Debug)]
pub struct TickBucketer {
    minutes: u32,
    current: Option<TickBatch>,
}

impl TickBucketer {
    /// Creates a new bucketer for buckets `minutes` wide.
    #[must_use]
    pub const fn new(minutes: u32) -> Self {
        Self {
            minutes,
            current: None,
        }
    }

    /// Returns the bucket width in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Adds a tick, returning the previous batch if this tick starts a new bucket.
    pub fn push(&mut self, tick: Tick) -> Option<TickBatch> {
        let start = bucket_start(tick.timestamp_secs(), self.minutes);

        match self.current.take() {
            Some(mut batch) if batch.bucket_start == start => {
                batch.ticks.push(tick);
                self.current = Some(batch);
                None
            }
            Some(batch) => {
                self.current = Some(TickBatch::new(start, vec![tick]));
                Some(batch)
            }
            None => {
                self.current = Some(TickBatch::new(start, vec![tick]));
                None
            }
        }
    }

    /// Finishes bucketing, returning any remaining partial batch.
    #[must_use]
    pub fn finish(self) -> Option<TickBatch> {
        self.current
    }
}
