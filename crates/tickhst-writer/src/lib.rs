//! MT4 HST401 history file writer for the tickhst converter.
//!
//! This crate turns bars into the binary history format MetaTrader 4 reads:
//!
//! - [`Header`] and [`BarRecord`] - Fixed-width encode/decode of the file layout
//! - [`ConverterConfig`] - Symbol, timeframe, spread and writer settings
//! - [`HstConverter`] - Aggregates tick batches and streams bars to a background writer
//! - [`WorkerState`] - Observable lifecycle of that writer

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod converter;
mod error;
mod header;
mod record;
mod worker;

pub use config::{ConverterConfig, DEFAULT_QUEUE_CAPACITY};
pub use converter::HstConverter;
pub use error::{DecodeError, EncodeError, HstError};
pub use header::{DEFAULT_COPYRIGHT, DEFAULT_DIGITS, HEADER_SIZE, HST_VERSION, Header};
pub use record::{BarRecord, RECORD_SIZE};
pub use worker::{WorkerState, WriteSummary};
