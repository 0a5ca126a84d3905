//! Tick-to-bar aggregation for the tickhst MT4 history converter.
//!
//! This crate provides tick-to-OHLCV (candlestick) aggregation:
//!
//! - [`Bar`] - OHLCV bar data structure
//! - [`aggregate`] - Reduces one bucket of ticks into a bar
//! - [`aggregate_checked`] - Same, rejecting batches that go back in time
//! - [`TickBucketer`] - Streaming grouping of ticks into per-bucket batches

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bar;
mod bucketer;

pub use aggregator::{OrderingError, aggregate, aggregate_checked};
pub use bar::Bar;
pub use bucketer::{TickBatch, TickBucketer};
