use serde::{Deserialize, Serialize};

use crate::core::{Color, OhlcBar, Timestamp};
use crate::error::{ScenarioError, ScenarioResult};

/// Single-value data item used by line, area, baseline and histogram series.
///
/// A point without `value` is whitespace: it reserves its time slot on the
/// horizontal axis but contributes no geometry and no autoscale input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinePoint {
    pub time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl LinePoint {
    #[must_use]
    pub fn new(time: impl Into<Timestamp>, value: f64) -> Self {
        Self {
            time: time.into(),
            value: Some(value),
            color: None,
        }
    }

    #[must_use]
    pub fn whitespace(time: impl Into<Timestamp>) -> Self {
        Self {
            time: time.into(),
            value: None,
            color: None,
        }
    }

    /// Sets a per-point color override; `None` keeps the series color.
    #[must_use]
    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.value.is_none()
    }

    pub fn validate(&self) -> ScenarioResult<()> {
        match self.value {
            Some(value) if !value.is_finite() => Err(ScenarioError::InvalidData(format!(
                "point at {} has a non-finite value",
                self.time
            ))),
            None if self.color.is_some() => Err(ScenarioError::InvalidData(format!(
                "whitespace point at {} cannot carry a color",
                self.time
            ))),
            _ => self.color.map_or(Ok(()), Color::validate),
        }
    }
}

/// Shape of the data items a series kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataShape {
    SingleValue,
    Ohlc,
}

/// One incremental data item passed to `update`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesItem {
    Ohlc(OhlcBar),
    SingleValue(LinePoint),
}

impl SeriesItem {
    #[must_use]
    pub fn time(&self) -> Timestamp {
        match self {
            Self::SingleValue(point) => point.time,
            Self::Ohlc(bar) => bar.time,
        }
    }

    #[must_use]
    pub fn shape(&self) -> DataShape {
        match self {
            Self::SingleValue(_) => DataShape::SingleValue,
            Self::Ohlc(_) => DataShape::Ohlc,
        }
    }

    /// Returns `false` for whitespace points.
    #[must_use]
    pub fn has_value(&self) -> bool {
        match self {
            Self::SingleValue(point) => !point.is_whitespace(),
            Self::Ohlc(_) => true,
        }
    }

    pub fn validate(&self) -> ScenarioResult<()> {
        match self {
            Self::SingleValue(point) => point.validate(),
            Self::Ohlc(bar) => bar.validate(),
        }
    }
}

impl From<LinePoint> for SeriesItem {
    fn from(value: LinePoint) -> Self {
        Self::SingleValue(value)
    }
}

impl From<OhlcBar> for SeriesItem {
    fn from(value: OhlcBar) -> Self {
        Self::Ohlc(value)
    }
}

/// Full data set assigned to one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "items", rename_all = "snake_case")]
pub enum SeriesData {
    SingleValue(Vec<LinePoint>),
    Ohlc(Vec<OhlcBar>),
}

impl SeriesData {
    #[must_use]
    pub fn shape(&self) -> DataShape {
        match self {
            Self::SingleValue(_) => DataShape::SingleValue,
            Self::Ohlc(_) => DataShape::Ohlc,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::SingleValue(points) => points.len(),
            Self::Ohlc(bars) => bars.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn into_items(self) -> Vec<SeriesItem> {
        match self {
            Self::SingleValue(points) => points.into_iter().map(SeriesItem::from).collect(),
            Self::Ohlc(bars) => bars.into_iter().map(SeriesItem::from).collect(),
        }
    }

    /// Validates every item and the strict time ordering of the set.
    pub fn validate(&self) -> ScenarioResult<()> {
        match self {
            Self::SingleValue(points) => {
                for point in points {
                    point.validate()?;
                }
                validate_strictly_increasing(points.iter().map(|point| point.time))
            }
            Self::Ohlc(bars) => {
                for bar in bars {
                    bar.validate()?;
                }
                validate_strictly_increasing(bars.iter().map(|bar| bar.time))
            }
        }
    }
}

impl From<Vec<LinePoint>> for SeriesData {
    fn from(value: Vec<LinePoint>) -> Self {
        Self::SingleValue(value)
    }
}

impl From<Vec<OhlcBar>> for SeriesData {
    fn from(value: Vec<OhlcBar>) -> Self {
        Self::Ohlc(value)
    }
}

/// Fails on the first timestamp that does not advance past its predecessor.
pub fn validate_strictly_increasing(
    times: impl IntoIterator<Item = Timestamp>,
) -> ScenarioResult<()> {
    let mut previous: Option<i64> = None;
    for (index, time) in times.into_iter().enumerate() {
        let current = time.unix_seconds();
        if let Some(previous) = previous
            && current <= previous
        {
            return Err(ScenarioError::UnorderedData {
                index,
                previous,
                current,
            });
        }
        previous = Some(current);
    }
    Ok(())
}
