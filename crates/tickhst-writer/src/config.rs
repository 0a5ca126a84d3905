//! Converter configuration.

use std::path::{Path, PathBuf};
use tracing::Dispatch;

use crate::Header;
use crate::header::DEFAULT_DIGITS;

/// Default number of bars that may wait in the queue before producers block.
pub const DEFAULT_QUEUE_CAPACITY: usize = 128;

/// Configuration for an [`HstConverter`](crate::HstConverter).
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Bar period in minutes.
    pub timeframe: u32,
    /// Spread written into every bar record, in points.
    pub spread: u32,
    /// Instrument symbol.
    pub symbol: String,
    /// Directory the history file is created in.
    pub destination: PathBuf,
    /// Maximum number of bars waiting to be written.
    pub queue_capacity: usize,
    /// Digits after the decimal point recorded in the header.
    pub digits: u32,
    /// Header creation timestamp; the current time when `None`.
    pub timesign: Option<i64>,
    /// Reject tick batches whose timestamps go backwards.
    pub validate_order: bool,
    /// Logger the writer reports through.
    pub dispatch: Dispatch,
}

impl ConverterConfig {
    /// Creates a configuration with default queue capacity, digits and logging.
    ///
    /// The logger defaults to the dispatcher that is current on the calling
    /// thread.
    #[must_use]
    pub fn new(
        timeframe: u32,
        spread: u32,
        symbol: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            timeframe,
            spread,
            symbol: symbol.into(),
            destination: destination.into(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            digits: DEFAULT_DIGITS,
            timesign: None,
            validate_order: false,
            dispatch: Dispatch::default(),
        }
    }

    /// Sets the queue capacity (at least one).
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Sets the digits recorded in the header.
    #[must_use]
    pub const fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    /// Sets a fixed header creation timestamp.
    #[must_use]
    pub const fn with_timesign(mut self, timesign: i64) -> Self {
        self.timesign = Some(timesign);
        self
    }

    /// Enables or disables tick order validation.
    #[must_use]
    pub const fn with_validate_order(mut self, validate: bool) -> Self {
        self.validate_order = validate;
        self
    }

    /// Sets the logger the writer reports through.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Returns the history file name, `<symbol><timeframe>.hst`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{}.hst", self.symbol, self.timeframe)
    }

    /// Returns the full path of the history file.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        Path::new(&self.destination).join(self.file_name())
    }

    /// Builds the file header described by this configuration.
    #[must_use]
    pub fn header(&self) -> Header {
        let header = Header::new(self.timeframe, self.symbol.clone()).with_digits(self.digits);
        match self.timesign {
            Some(timesign) => header.with_timesign(timesign),
            None => header,
        }
    }
}
