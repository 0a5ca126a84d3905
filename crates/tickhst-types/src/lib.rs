//! Core types for the tickhst MT4 history converter.
//!
//! This crate provides the fundamental data structures used throughout tickhst:
//!
//! - [`Tick`] - A single quote with symbol, timestamp, ask, bid, and volumes
//! - [`Timeframe`] - Bar aggregation timeframe in MT4 periods
//! - [`bucket_start`] - Truncation of a timestamp to its bucket boundary

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod tick;
mod timeframe;

pub use tick::Tick;
pub use timeframe::{Timeframe, TimeframeParseError, bucket_start};
