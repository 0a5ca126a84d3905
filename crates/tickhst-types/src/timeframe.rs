//! Bar aggregation timeframe definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bar aggregation timeframe, matching the standard MT4 chart periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// 1-minute bars.
    #[default]
    #[serde(rename = "m1")]
    Minute1,
    /// 5-minute bars.
    #[serde(rename = "m5")]
    Minute5,
    /// 15-minute bars.
    #[serde(rename = "m15")]
    Minute15,
    /// 30-minute bars.
    #[serde(rename = "m30")]
    Minute30,
    /// 1-hour bars.
    #[serde(rename = "h1")]
    Hour1,
    /// 4-hour bars.
    #[serde(rename = "h4")]
    Hour4,
    /// Daily bars.
    #[serde(rename = "d1")]
    Day1,
}

impl Timeframe {
    /// Returns the period length in minutes, as stored in the history file header.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        match self {
            Self::Minute1 => 1,
            Self::Minute5 => 5,
            Self::Minute15 => 15,
            Self::Minute30 => 30,
            Self::Hour1 => 60,
            Self::Hour4 => 240,
            Self::Day1 => 1440,
        }
    }

    /// Returns the period length in seconds.
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.minutes() as i64 * 60
    }

    /// Returns the start of the bucket containing `timestamp_secs`.
    #[must_use]
    pub const fn bucket_start(&self, timestamp_secs: i64) -> i64 {
        bucket_start(timestamp_secs, self.minutes())
    }

    /// Looks up the timeframe with the given period length in minutes.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            1 => Some(Self::Minute1),
            5 => Some(Self::Minute5),
            15 => Some(Self::Minute15),
            30 => Some(Self::Minute30),
            60 => Some(Self::Hour1),
            240 => Some(Self::Hour4),
            1440 => Some(Self::Day1),
            _ => None,
        }
    }

    /// Returns the timeframe as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "m1",
            Self::Minute5 => "m5",
            Self::Minute15 => "m15",
            Self::Minute30 => "m30",
            Self::Hour1 => "h1",
            Self::Hour4 => "h4",
            Self::Day1 => "d1",
        }
    }

    /// Returns all available timeframes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Minute1,
            Self::Minute5,
            Self::Minute15,
            Self::Minute30,
            Self::Hour1,
            Self::Hour4,
            Self::Day1,
        ]
    }
}

/// Truncates a Unix timestamp (seconds) to the start of its `minutes`-wide bucket.
///
/// Buckets are aligned to the Unix epoch. A width of zero leaves the
/// timestamp unchanged.
#[must_use]
pub const fn bucket_start(timestamp_secs: i64, minutes: u32) -> i64 {
    let width = minutes as i64 * 60;
    if width == 0 {
        return timestamp_secs;
    }
    timestamp_secs.div_euclid(width) * width
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(minutes) = s.parse::<u32>() {
            return Self::from_minutes(minutes).ok_or_else(|| TimeframeParseError(s.to_string()));
        }
        match s.to_lowercase().as_str() {
            "m1" | "1m" | "minute" | "minute1" => Ok(Self::Minute1),
            "m5" | "5m" | "minute5" => Ok(Self::Minute5),
            "m15" | "15m" | "minute15" => Ok(Self::Minute15),
            "m30" | "30m" | "minute30" => Ok(Self::Minute30),
            "h1" | "1h" | "hour" | "hour1" => Ok(Self::Hour1),
            "h4" | "4h" | "hour4" => Ok(Self::Hour4),
            "d1" | "1d" | "day" | "day1" | "daily" => Ok(Self::Day1),
            _ => Err(TimeframeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(String);

impl std::fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid timeframe '{}', expected one of: m1, m5, m15, m30, h1, h4, d1 \
             or a period in minutes (1, 5, 15, 30, 60, 240, 1440)",
            self.0
        )
    }
}

impl std::error::Error for TimeframeParseError {}
