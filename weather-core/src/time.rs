//! Conversions between GMT UNIX timestamps and their calendar rendering.

use std::{fmt, str::FromStr};

use chrono::DateTime;

use crate::error::{Result, WeatherError};

/// Calendar layout produced by [`unix_to_iso8601`], e.g. `2013-09-06 09:20:00+00`.
const ISO8601_LAYOUT: &str = "%Y-%m-%d %H:%M:%S+00";

/// Output format selector for the time accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeFormat {
    /// Seconds since the epoch, returned unchanged.
    #[default]
    Unix,
    /// UTC calendar string.
    Iso,
}

impl TimeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFormat::Unix => "unix",
            TimeFormat::Iso => "iso",
        }
    }

    pub const fn all() -> &'static [TimeFormat] {
        &[TimeFormat::Unix, TimeFormat::Iso]
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TimeFormat {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "unix" => Ok(TimeFormat::Unix),
            "iso" => Ok(TimeFormat::Iso),
            _ => Err(WeatherError::InvalidArgument(value.to_string())),
        }
    }
}

impl FromStr for TimeFormat {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self> {
        TimeFormat::try_from(s)
    }
}

/// A time field rendered in the requested [`TimeFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeValue {
    Unix(i64),
    Iso(String),
}

impl TimeValue {
    pub fn as_unix(&self) -> Option<i64> {
        match self {
            TimeValue::Unix(ts) => Some(*ts),
            TimeValue::Iso(_) => None,
        }
    }

    pub fn as_iso(&self) -> Option<&str> {
        match self {
            TimeValue::Unix(_) => None,
            TimeValue::Iso(s) => Some(s.as_str()),
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Unix(ts) => write!(f, "{ts}"),
            TimeValue::Iso(s) => f.write_str(s),
        }
    }
}

/// Render a GMT UNIX timestamp as a UTC calendar string.
pub fn unix_to_iso8601(ts: i64) -> Result<String> {
    let dt = DateTime::from_timestamp(ts, 0).ok_or(WeatherError::Timestamp(ts))?;
    Ok(dt.format(ISO8601_LAYOUT).to_string())
}

pub(crate) fn render(ts: i64, format: TimeFormat) -> Result<TimeValue> {
    match format {
        TimeFormat::Unix => Ok(TimeValue::Unix(ts)),
        TimeFormat::Iso => unix_to_iso8601(ts).map(TimeValue::Iso),
    }
}
