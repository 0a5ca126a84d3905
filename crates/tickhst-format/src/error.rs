//! Error type shared by the tick readers and writers.

use thiserror::Error;

/// Errors that can occur while reading or writing tick rows.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV stream could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// A row has the wrong shape or an unparsable field.
    #[error("invalid row at line {line}: {reason}")]
    InvalidRow {
        /// One-based line number in the input.
        line: u64,
        /// What is wrong with the row.
        reason: String,
    },
}
