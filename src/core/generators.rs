//! Deterministic synthetic series used by scenarios.
//!
//! Every value is a pure function of its index and the generator parameters:
//! no randomness, no wall clock. Repeated runs produce identical sequences,
//! and every sequence has strictly increasing timestamps.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{SECONDS_PER_DAY, add_days, business_day_to_unix_seconds};
use crate::core::{Color, LinePoint, OhlcBar, Timestamp};
use crate::error::{ScenarioError, ScenarioResult};

/// Palette used by the colored-series fixtures; `None` keeps the series color.
pub const DEFAULT_PALETTE: [Option<Color>; 3] = [
    Some(Color::rgb(0x01, 0x33, 0x70)),
    Some(Color::rgb(0x3a, 0x96, 0x56)),
    None,
];

/// Maps an item index to its time coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStepping {
    /// One UTC calendar day per index, emitted as epoch seconds.
    DailyFrom(NaiveDate),
    /// One UTC calendar day per index, emitted as business-day strings.
    BusinessDaysFrom(NaiveDate),
    /// `start + index`, for non-calendar scenarios.
    Index { start: i64 },
}

impl TimeStepping {
    /// Daily stepping starting at `2018-01-01`, the epoch of most fixtures.
    #[must_use]
    pub fn daily_from_2018() -> Self {
        Self::DailyFrom(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default())
    }

    pub fn time_at(self, index: usize) -> ScenarioResult<Timestamp> {
        let offset = i64::try_from(index)
            .map_err(|_| ScenarioError::InvalidData("index overflows i64".to_owned()))?;
        match self {
            Self::DailyFrom(start) => offset
                .checked_mul(SECONDS_PER_DAY)
                .and_then(|delta| business_day_to_unix_seconds(start).checked_add(delta))
                .map(Timestamp::Unix)
                .ok_or_else(|| ScenarioError::InvalidData("daily timestamp overflow".to_owned())),
            Self::BusinessDaysFrom(start) => add_days(start, index).map(Timestamp::BusinessDay),
            Self::Index { start } => start
                .checked_add(offset)
                .map(Timestamp::Unix)
                .ok_or_else(|| ScenarioError::InvalidData("index timestamp overflow".to_owned())),
        }
    }
}

/// Linear value rule: `value(i) = (index_base + i) * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearValues {
    pub index_base: f64,
    pub scale: f64,
    pub offset: f64,
}

impl LinearValues {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            index_base: 0.0,
            scale: 1.0,
            offset: 0.0,
        }
    }

    #[must_use]
    pub const fn offset(offset: f64) -> Self {
        Self {
            offset,
            ..Self::identity()
        }
    }

    /// Sub-unit scaling for logarithmic and small-value scenarios.
    #[must_use]
    pub const fn scaled(scale: f64) -> Self {
        Self {
            scale,
            ..Self::identity()
        }
    }

    #[must_use]
    pub const fn with_index_base(mut self, index_base: f64) -> Self {
        self.index_base = index_base;
        self
    }

    #[must_use]
    pub fn value_at(self, index: usize) -> f64 {
        (self.index_base + index as f64) * self.scale + self.offset
    }
}

impl Default for LinearValues {
    fn default() -> Self {
        Self::identity()
    }
}

pub fn linear_series(
    count: usize,
    stepping: TimeStepping,
    values: LinearValues,
) -> ScenarioResult<Vec<LinePoint>> {
    (0..count)
        .map(|i| Ok(LinePoint::new(stepping.time_at(i)?, values.value_at(i))))
        .collect()
}

/// Emits `i + offset` on every `period`-th index and whitespace elsewhere.
///
/// Index 0 always carries a value, so a sparse series never starts on a gap.
pub fn sparse_series(
    count: usize,
    stepping: TimeStepping,
    period: usize,
    offset: f64,
) -> ScenarioResult<Vec<LinePoint>> {
    if period == 0 {
        return Err(ScenarioError::InvalidData(
            "sparse period must be > 0".to_owned(),
        ));
    }
    (0..count)
        .map(|i| {
            let time = stepping.time_at(i)?;
            Ok(if i % period == 0 {
                LinePoint::new(time, i as f64 + offset)
            } else {
                LinePoint::whitespace(time)
            })
        })
        .collect()
}

/// Deterministic OHLC values for one index.
///
/// Returns `(open, high, low, close)`; `low <= open, close <= high` holds for
/// every non-negative index.
#[must_use]
pub fn ohlc_at(index: usize) -> (f64, f64, f64, f64) {
    let step = (index % 20) as f64 / 5000.0;
    let base = index as f64 / 5.0;
    let sign = if index % 2 == 1 { 1.0 } else { -1.0 };
    (
        base * (1.0 - sign * step),
        base * (1.0 + 4.0 * step),
        base * (1.0 - 4.0 * step),
        base * (1.0 + sign * step),
    )
}

pub fn ohlc_series(count: usize, stepping: TimeStepping) -> ScenarioResult<Vec<OhlcBar>> {
    (0..count)
        .map(|i| {
            let (open, high, low, close) = ohlc_at(i);
            OhlcBar::new(stepping.time_at(i)?, open, high, low, close)
        })
        .collect()
}

/// Emits `offset + i` with color `palette[i % palette.len()]`.
pub fn colored_series(
    count: usize,
    stepping: TimeStepping,
    offset: f64,
    palette: &[Option<Color>],
) -> ScenarioResult<Vec<LinePoint>> {
    if palette.is_empty() {
        return Err(ScenarioError::InvalidData(
            "color palette must not be empty".to_owned(),
        ));
    }
    (0..count)
        .map(|i| {
            Ok(LinePoint::new(stepping.time_at(i)?, offset + i as f64)
                .with_color(palette[i % palette.len()]))
        })
        .collect()
}

/// Builds points from literal `(time, value)` pairs; `None` is whitespace.
#[must_use]
pub fn fixed_series(items: &[(Timestamp, Option<f64>)]) -> Vec<LinePoint> {
    items
        .iter()
        .map(|(time, value)| match value {
            Some(value) => LinePoint::new(*time, *value),
            None => LinePoint::whitespace(*time),
        })
        .collect()
}
