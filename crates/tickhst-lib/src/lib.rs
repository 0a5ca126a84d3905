//! Convert tick data into MetaTrader 4 HST401 history files.
//!
//! This is a facade crate that re-exports functionality from the tickhst
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use tickhst_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = tokio::fs::File::open("EURUSD.csv").await?;
//!     let ticks = read_ticks_csv(file, "EURUSD").await?;
//!
//!     let timeframe = Timeframe::Hour1;
//!     let config = ConverterConfig::new(timeframe.minutes(), 2, "EURUSD", ".");
//!     let converter = HstConverter::create(config)?;
//!
//!     let mut bucketer = TickBucketer::new(timeframe.minutes());
//!     for tick in ticks {
//!         if let Some(batch) = bucketer.push(tick) {
//!             converter.pack_ticks(batch.bucket_start, &batch.ticks).await?;
//!         }
//!     }
//!     if let Some(batch) = bucketer.finish() {
//!         converter.pack_ticks(batch.bucket_start, &batch.ticks).await?;
//!     }
//!
//!     let summary = converter.finish().await?;
//!     println!("wrote {} bars", summary.bars_written);
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickhst_types::*;

// Re-export aggregation
pub use tickhst_aggregate::{
    Bar, OrderingError, TickBatch, TickBucketer, aggregate, aggregate_checked,
};

// Re-export the history writer
#[cfg(feature = "writer")]
pub use tickhst_writer::{
    BarRecord, ConverterConfig, DEFAULT_COPYRIGHT, DEFAULT_DIGITS, DEFAULT_QUEUE_CAPACITY,
    DecodeError, EncodeError, HEADER_SIZE, HST_VERSION, Header, HstConverter, HstError,
    RECORD_SIZE, WorkerState, WriteSummary,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickhst_format::{CsvFormatter, CsvTickReader, FormatError, TICK_COLUMNS, read_ticks_csv};

/// Prelude module for convenient imports.
///
/// ```
/// use tickhst_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickhst_types::{Tick, Timeframe, bucket_start};

    pub use tickhst_aggregate::{Bar, TickBatch, TickBucketer, aggregate};

    #[cfg(feature = "writer")]
    pub use tickhst_writer::{ConverterConfig, HstConverter, HstError, WorkerState, WriteSummary};

    #[cfg(feature = "format")]
    pub use tickhst_format::{CsvFormatter, CsvTickReader, read_ticks_csv};
}
