//! Tick row formats for the tickhst MT4 history converter.
//!
//! This crate reads and writes ticks as delimited text:
//!
//! - [`CsvFormatter`] - Writes ticks as CSV or TSV rows
//! - [`CsvTickReader`] - Reads the same rows back asynchronously
//! - [`read_ticks_csv`] - Shorthand for a comma-separated file with a header

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod reader;
mod writer;

pub use error::FormatError;
pub use reader::{CsvTickReader, read_ticks_csv};
pub use writer::{CsvFormatter, TICK_COLUMNS};
