use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::business_day_to_unix_seconds;

/// Size of a rendering target in CSS-like pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(600, 400)
    }
}

/// Horizontal coordinate of a data item.
///
/// Serialized as a JSON number (epoch seconds) or a `"YYYY-MM-DD"` string.
/// Equality and ordering compare the resolved epoch-second instant, so
/// `Unix(1514764800)` and `BusinessDay(2018-01-01)` are the same slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Unix(i64),
    BusinessDay(NaiveDate),
}

impl Timestamp {
    #[must_use]
    pub fn unix_seconds(self) -> i64 {
        match self {
            Self::Unix(seconds) => seconds,
            Self::BusinessDay(day) => business_day_to_unix_seconds(day),
        }
    }

    /// Parses a `"YYYY-MM-DD"` business day.
    pub fn business_day(text: &str) -> crate::error::ScenarioResult<Self> {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Self::BusinessDay)
            .map_err(|err| {
                crate::error::ScenarioError::InvalidData(format!(
                    "invalid business day `{text}`: {err}"
                ))
            })
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.unix_seconds() == other.unix_seconds()
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unix_seconds().cmp(&other.unix_seconds())
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self::Unix(value)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(value: NaiveDate) -> Self {
        Self::BusinessDay(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix(seconds) => write!(f, "{seconds}"),
            Self::BusinessDay(day) => write!(f, "{}", day.format("%Y-%m-%d")),
        }
    }
}
