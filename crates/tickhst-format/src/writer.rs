//! CSV tick export.

use std::io::Write;
use tickhst_types::Tick;

use crate::FormatError;

/// Column names of a tick row, in order.
pub const TICK_COLUMNS: [&str; 5] = ["timestamp", "ask", "bid", "ask_volume", "bid_volume"];

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self.delimiter {
            '\t' => "tsv",
            _ => "csv",
        }
    }

    /// Writes ticks as rows produced by [`Tick::to_row`].
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_ticks<W: Write>(&self, ticks: &[Tick], mut writer: W) -> Result<(), FormatError> {
        let delimiter = self.delimiter.to_string();

        if self.include_header {
            writeln!(writer, "{}", TICK_COLUMNS.join(delimiter.as_str()))?;
        }

        for tick in ticks {
            writeln!(writer, "{}", tick.to_row().join(delimiter.as_str()))?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    fn create_test_tick() -> Tick {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap();
        Tick::new("EURUSD", timestamp, 1.1001, 1.1, 100.0, 200.5)
    }

    fn render(formatter: &CsvFormatter) -> String {
        let mut output = Cursor::new(Vec::new());
        formatter
            .write_ticks(&[create_test_tick()], &mut output)
            .unwrap();
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn test_csv_ticks() {
        let result = render(&CsvFormatter::new());
        assert_eq!(
            result,
            "timestamp,ask,bid,ask_volume,bid_volume\n\
             2024-01-15 12:30:45.000,1.10010,1.10000,100.00,200.50\n"
        );
    }

    #[test]
    fn test_csv_no_header() {
        let result = render(&CsvFormatter::new().with_header(false));
        assert!(!result.contains("timestamp,ask"));
        assert_eq!(result.lines().count(), 1);
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let result = render(&formatter);
        assert!(result.contains("timestamp\task\tbid"));
        assert!(result.contains("1.10010\t1.10000"));
        assert_eq!(formatter.extension(), "tsv");
    }

    #[test]
    fn test_custom_delimiter() {
        let result = render(&CsvFormatter::new().with_delimiter(';'));
        assert!(result.starts_with("timestamp;ask;bid"));
    }
}
