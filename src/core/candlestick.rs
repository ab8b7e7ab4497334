use serde::{Deserialize, Serialize};

use crate::core::Timestamp;
use crate::error::{ScenarioError, ScenarioResult};

/// Canonical OHLC item used by bar and candlestick series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OhlcBar {
    pub time: Timestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcBar {
    /// Builds a validated OHLC bar.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(
        time: impl Into<Timestamp>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> ScenarioResult<Self> {
        let bar = Self {
            time: time.into(),
            open,
            high,
            low,
            close,
        };
        bar.validate()?;
        Ok(bar)
    }

    pub fn validate(&self) -> ScenarioResult<()> {
        if !self.open.is_finite()
            || !self.high.is_finite()
            || !self.low.is_finite()
            || !self.close.is_finite()
        {
            return Err(ScenarioError::InvalidData(
                "ohlc values must be finite".to_owned(),
            ));
        }

        if self.low > self.high {
            return Err(ScenarioError::InvalidData(
                "ohlc low must be <= high".to_owned(),
            ));
        }

        if self.open < self.low
            || self.open > self.high
            || self.close < self.low
            || self.close > self.high
        {
            return Err(ScenarioError::InvalidData(
                "ohlc open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(())
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}
