//! CSV tick import.

use chrono::{DateTime, NaiveDateTime, Utc};
use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use futures::StreamExt;
use tickhst_types::Tick;
use tokio::io::AsyncRead;

use crate::FormatError;
use crate::writer::TICK_COLUMNS;

/// Timestamp layout accepted on input; the fraction is optional.
const INPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Reads tick rows in the layout written by [`CsvFormatter`](crate::CsvFormatter).
///
/// Timestamps may be `YYYY-MM-DD HH:MM:SS[.fff]` (UTC), RFC 3339, or integer
/// milliseconds since the Unix epoch. Rows are returned in file order.
#[derive(Debug, Clone)]
pub struct CsvTickReader {
    delimiter: u8,
    has_header: bool,
}

impl Default for CsvTickReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvTickReader {
    /// Creates a reader for comma-separated input with a header row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first row is a header to skip.
    #[must_use]
    pub const fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Reads every row of `reader` as a tick of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidRow`] with the line number of the first
    /// malformed row, or [`FormatError::Csv`] if the input is not valid CSV.
    pub async fn read_ticks<R>(&self, reader: R, symbol: &str) -> Result<Vec<Tick>, FormatError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let mut csv = AsyncReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_header)
            .flexible(true)
            .trim(Trim::All)
            .create_reader(reader);
        let mut records = csv.records();

        let mut ticks = Vec::new();
        while let Some(record) = records.next().await {
            ticks.push(parse_row(&record?, symbol)?);
        }
        Ok(ticks)
    }
}

/// Reads comma-separated tick rows with a header, see [`CsvTickReader`].
///
/// # Errors
///
/// Returns an error on the first malformed row.
pub async fn read_ticks_csv<R>(reader: R, symbol: &str) -> Result<Vec<Tick>, FormatError>
where
    R: AsyncRead + Unpin + Send,
{
    CsvTickReader::new().read_ticks(reader, symbol).await
}

fn parse_row(record: &StringRecord, symbol: &str) -> Result<Tick, FormatError> {
    let line = record.position().map_or(0, |p| p.line());
    let invalid = |reason: String| FormatError::InvalidRow { line, reason };

    if record.len() != TICK_COLUMNS.len() {
        return Err(invalid(format!(
            "expected {} fields, found {}",
            TICK_COLUMNS.len(),
            record.len()
        )));
    }

    let field = |index: usize| record.get(index).unwrap_or_default();
    let number = |index: usize| {
        let value = field(index);
        value
            .parse::<f64>()
            .map_err(|_| invalid(format!("invalid {} '{value}'", TICK_COLUMNS[index])))
    };

    let timestamp = parse_timestamp(field(0))
        .ok_or_else(|| invalid(format!("invalid timestamp '{}'", field(0))))?;

    Ok(Tick::new(
        symbol,
        timestamp,
        number(1)?,
        number(2)?,
        number(3)?,
        number(4)?,
    ))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, INPUT_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc)))
        .ok()
        .or_else(|| {
            value
                .parse::<i64>()
                .ok()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
        })
}
