//! HST401 bar record.

use byteorder::{ByteOrder, LittleEndian};
use tickhst_aggregate::Bar;

use crate::{DecodeError, EncodeError};

/// Size in bytes of an encoded bar record.
pub const RECORD_SIZE: usize = 60;

/// One bar as stored in an HST401 history file.
///
/// Layout (60 bytes, little-endian): `i64` open time, `f64` open, high, low
/// and close, `i64` tick volume, `i32` spread, `i64` real volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRecord {
    /// Bar open time in seconds since the Unix epoch.
    pub time: i64,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Tick volume.
    pub tick_volume: u64,
    /// Spread in points.
    pub spread: u32,
    /// Real (traded) volume; zero for quote-derived bars.
    pub real_volume: u64,
}

impl BarRecord {
    /// Builds the record for `bar` with the given spread.
    #[must_use]
    pub const fn from_bar(bar: &Bar, spread: u32) -> Self {
        Self {
            time: bar.time,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            tick_volume: bar.volume,
            spread,
            real_volume: 0,
        }
    }

    /// Encodes the record into its fixed 60-byte layout.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidBar`] for non-finite prices or prices that
    /// break `low <= open, close <= high`, and [`EncodeError::FieldOutOfRange`]
    /// when a volume exceeds `i64::MAX` or the spread exceeds `i32::MAX`.
    pub fn encode(&self) -> Result<[u8; RECORD_SIZE], EncodeError> {
        self.validate()?;

        let mut buf = [0u8; RECORD_SIZE];
        LittleEndian::write_i64(&mut buf[0..8], self.time);
        LittleEndian::write_f64(&mut buf[8..16], self.open);
        LittleEndian::write_f64(&mut buf[16..24], self.high);
        LittleEndian::write_f64(&mut buf[24..32], self.low);
        LittleEndian::write_f64(&mut buf[32..40], self.close);
        LittleEndian::write_i64(&mut buf[40..48], to_i64("tick_volume", self.tick_volume)?);
        LittleEndian::write_i32(&mut buf[48..52], to_i32("spread", self.spread)?);
        LittleEndian::write_i64(&mut buf[52..60], to_i64("real_volume", self.real_volume)?);
        Ok(buf)
    }

    /// Decodes a record from its fixed 60-byte layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is wrong or a volume or the spread is negative.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() != RECORD_SIZE {
            return Err(DecodeError::InvalidLength {
                expected: RECORD_SIZE,
                actual: data.len(),
            });
        }

        Ok(Self {
            time: LittleEndian::read_i64(&data[0..8]),
            open: LittleEndian::read_f64(&data[8..16]),
            high: LittleEndian::read_f64(&data[16..24]),
            low: LittleEndian::read_f64(&data[24..32]),
            close: LittleEndian::read_f64(&data[32..40]),
            tick_volume: non_negative("tick_volume", LittleEndian::read_i64(&data[40..48]))?,
            spread: non_negative("spread", LittleEndian::read_i32(&data[48..52]).into())?,
            real_volume: non_negative("real_volume", LittleEndian::read_i64(&data[52..60]))?,
        })
    }

    fn validate(&self) -> Result<(), EncodeError> {
        let invalid = |reason: &'static str| EncodeError::InvalidBar {
            time: self.time,
            reason,
        };
        if ![self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite())
        {
            return Err(invalid("non-finite price"));
        }
        if self.low > self.high {
            return Err(invalid("low above high"));
        }
        if self.open < self.low || self.open > self.high {
            return Err(invalid("open outside low..high"));
        }
        if self.close < self.low || self.close > self.high {
            return Err(invalid("close outside low..high"));
        }
        Ok(())
    }
}

fn to_i64(field: &'static str, value: u64) -> Result<i64, EncodeError> {
    i64::try_from(value).map_err(|_| EncodeError::FieldOutOfRange {
        field,
        value: value.into(),
    })
}

fn to_i32(field: &'static str, value: u32) -> Result<i32, EncodeError> {
    i32::try_from(value).map_err(|_| EncodeError::FieldOutOfRange {
        field,
        value: value.into(),
    })
}

fn non_negative<T: TryFrom<i64>>(field: &'static str, value: i64) -> Result<T, DecodeError> {
    T::try_from(value).map_err(|_| DecodeError::Negative { field, value })
}
