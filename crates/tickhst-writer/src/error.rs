//! Error types for history file encoding and writing.

use thiserror::Error;
use tickhst_aggregate::OrderingError;

/// Errors that can occur while encoding a header or bar record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The header symbol is empty.
    #[error("symbol is empty")]
    EmptySymbol,

    /// A text field does not fit its fixed-width slot.
    #[error("{field} '{value}' is {len} bytes, at most {max} fit")]
    TextTooLong {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Length of the value in bytes.
        len: usize,
        /// Maximum length in bytes, excluding the terminating NUL.
        max: usize,
    },

    /// A text field contains non-ASCII characters.
    #[error("{field} '{value}' must be ASCII")]
    NonAscii {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A numeric field does not fit its binary slot.
    #[error("{field} value {value} does not fit its slot")]
    FieldOutOfRange {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: i128,
    },

    /// A bar breaks the OHLC invariant or carries a non-finite price.
    #[error("bar at {time} is invalid: {reason}")]
    InvalidBar {
        /// Bar start time in seconds.
        time: i64,
        /// What is wrong with the bar.
        reason: &'static str,
    },
}

/// Errors that can occur while decoding a header or bar record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input length differs from the fixed record size.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Fixed record size.
        expected: usize,
        /// Length of the input.
        actual: usize,
    },

    /// The header declares a version other than 401.
    #[error("unsupported history file version {0}")]
    UnsupportedVersion(i32),

    /// A text field contains non-ASCII bytes.
    #[error("{0} is not ASCII")]
    NonAscii(&'static str),

    /// A field that must be non-negative is negative.
    #[error("{field} is negative ({value})")]
    Negative {
        /// Name of the field.
        field: &'static str,
        /// The decoded value.
        value: i64,
    },
}

/// Errors reported by [`HstConverter`](crate::HstConverter).
#[derive(Error, Debug)]
pub enum HstError {
    /// The converter was created outside a Tokio runtime.
    #[error("converter must be created inside a Tokio runtime")]
    NoRuntime,

    /// The destination could not be created or opened.
    #[error("failed to open {destination}: {source}")]
    FileOpen {
        /// Path or description of the destination.
        destination: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The header could not be encoded.
    #[error("failed to encode header: {0}")]
    HeaderEncode(#[source] EncodeError),

    /// The header could not be written.
    #[error("failed to write header: {0}")]
    HeaderWrite(#[source] std::io::Error),

    /// Buffered bars could not be flushed when closing the file.
    #[error("failed to flush history file: {0}")]
    Flush(#[source] std::io::Error),

    /// The writer has stopped and accepts no more bars.
    #[error("history writer stopped: {reason}")]
    WorkerStopped {
        /// Why the writer stopped.
        reason: String,
    },

    /// The writer task panicked or was cancelled.
    #[error("history writer task failed: {0}")]
    WorkerPanicked(String),

    /// A tick batch was not in time order.
    #[error(transparent)]
    Ordering(#[from] OrderingError),
}
