//! HST401 file header.
//!
//! The header is 148 bytes, little-endian:
//!
//! | offset | size | field                              |
//! |--------|------|------------------------------------|
//! | 0      | 4    | `i32` version (401)                |
//! | 4      | 64   | copyright, NUL padded              |
//! | 68     | 12   | symbol, NUL padded                 |
//! | 80     | 4    | `i32` period in minutes            |
//! | 84     | 4    | `i32` digits after the decimal point |
//! | 88     | 4    | `i32` timesign (creation time)     |
//! | 92     | 4    | `i32` last sync time               |
//! | 96     | 52   | 13 reserved `i32` words, zero      |

use byteorder::{ByteOrder, LittleEndian};
use chrono::Utc;

use crate::{DecodeError, EncodeError};

/// Size in bytes of an encoded header.
pub const HEADER_SIZE: usize = 148;

/// History file format version written by this crate.
pub const HST_VERSION: i32 = 401;

/// Copyright string MetaTrader writes into its own history files.
pub const DEFAULT_COPYRIGHT: &str = "(C)opyright 2003, MetaQuotes Software Corp.";

/// Default number of digits after the decimal point.
pub const DEFAULT_DIGITS: u32 = 5;

const COPYRIGHT_RANGE: std::ops::Range<usize> = 4..68;
const SYMBOL_RANGE: std::ops::Range<usize> = 68..80;

/// Header record of an HST401 history file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    copyright: String,
    symbol: String,
    period: u32,
    digits: u32,
    timesign: i64,
    last_sync: i64,
}

impl Header {
    /// Maximum symbol length in bytes; the slot keeps room for a terminating NUL.
    pub const MAX_SYMBOL_LEN: usize = 11;

    /// Creates a header for `symbol` bars of `period` minutes.
    ///
    /// The timesign is the current time; digits default to [`DEFAULT_DIGITS`]
    /// and the last sync time to zero.
    #[must_use]
    pub fn new(period: u32, symbol: impl Into<String>) -> Self {
        Self {
            copyright: DEFAULT_COPYRIGHT.to_string(),
            symbol: symbol.into(),
            period,
            digits: DEFAULT_DIGITS,
            timesign: Utc::now().timestamp(),
            last_sync: 0,
        }
    }

    /// Sets the number of digits after the decimal point.
    #[must_use]
    pub const fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    /// Sets the creation timestamp (seconds since the Unix epoch).
    #[must_use]
    pub const fn with_timesign(mut self, timesign: i64) -> Self {
        self.timesign = timesign;
        self
    }

    /// Sets the last synchronization timestamp (seconds since the Unix epoch).
    #[must_use]
    pub const fn with_last_sync(mut self, last_sync: i64) -> Self {
        self.last_sync = last_sync;
        self
    }

    /// Returns the symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the copyright string.
    #[must_use]
    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    /// Returns the period in minutes.
    #[must_use]
    pub const fn period(&self) -> u32 {
        self.period
    }

    /// Returns the number of digits after the decimal point.
    #[must_use]
    pub const fn digits(&self) -> u32 {
        self.digits
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn timesign(&self) -> i64 {
        self.timesign
    }

    /// Returns the last synchronization timestamp.
    #[must_use]
    pub const fn last_sync(&self) -> i64 {
        self.last_sync
    }

    /// Encodes the header into its fixed 148-byte layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is empty, non-ASCII or longer than
    /// [`Header::MAX_SYMBOL_LEN`], or if a numeric field does not fit `i32`.
    pub fn encode(&self) -> Result<[u8; HEADER_SIZE], EncodeError> {
        if self.symbol.is_empty() {
            return Err(EncodeError::EmptySymbol);
        }

        let mut buf = [0u8; HEADER_SIZE];
        LittleEndian::write_i32(&mut buf[0..4], HST_VERSION);
        write_text(&mut buf[COPYRIGHT_RANGE], "copyright", &self.copyright)?;
        write_text(&mut buf[SYMBOL_RANGE], "symbol", &self.symbol)?;
        LittleEndian::write_i32(&mut buf[80..84], to_i32("period", self.period.into())?);
        LittleEndian::write_i32(&mut buf[84..88], to_i32("digits", self.digits.into())?);
        LittleEndian::write_i32(&mut buf[88..92], to_i32("timesign", self.timesign)?);
        LittleEndian::write_i32(&mut buf[92..96], to_i32("last_sync", self.last_sync)?);
        Ok(buf)
    }

    /// Decodes a header from its fixed 148-byte layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong, the version is not 401, a text
    /// field is not ASCII, or period or digits are negative.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() != HEADER_SIZE {
            return Err(DecodeError::InvalidLength {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let version = LittleEndian::read_i32(&data[0..4]);
        if version != HST_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        Ok(Self {
            copyright: read_text(&data[COPYRIGHT_RANGE], "copyright")?,
            symbol: read_text(&data[SYMBOL_RANGE], "symbol")?,
            period: to_u32("period", LittleEndian::read_i32(&data[80..84]))?,
            digits: to_u32("digits", LittleEndian::read_i32(&data[84..88]))?,
            timesign: LittleEndian::read_i32(&data[88..92]).into(),
            last_sync: LittleEndian::read_i32(&data[92..96]).into(),
        })
    }
}

/// Copies an ASCII string into a NUL-padded slot, keeping the last byte as NUL.
fn write_text(slot: &mut [u8], field: &'static str, value: &str) -> Result<(), EncodeError> {
    if !value.is_ascii() {
        return Err(EncodeError::NonAscii {
            field,
            value: value.to_string(),
        });
    }
    let max = slot.len() - 1;
    if value.len() > max {
        return Err(EncodeError::TextTooLong {
            field,
            value: value.to_string(),
            len: value.len(),
            max,
        });
    }
    slot[..value.len()].copy_from_slice(value.as_bytes());
    Ok(())
}

/// Reads a NUL-terminated ASCII string from a fixed-width slot.
fn read_text(slot: &[u8], field: &'static str) -> Result<String, DecodeError> {
    let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    let text = &slot[..end];
    if !text.is_ascii() {
        return Err(DecodeError::NonAscii(field));
    }
    Ok(text.iter().map(|&b| char::from(b)).collect())
}

fn to_i32(field: &'static str, value: i64) -> Result<i32, EncodeError> {
    i32::try_from(value).map_err(|_| EncodeError::FieldOutOfRange {
        field,
        value: value.into(),
    })
}

fn to_u32(field: &'static str, value: i32) -> Result<u32, DecodeError> {
    u32::try_from(value).map_err(|_| DecodeError::Negative {
        field,
        value: value.into(),
    })
}
