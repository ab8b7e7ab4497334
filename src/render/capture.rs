use serde::{Deserialize, Serialize};

use crate::api::{
    LineStyle, PriceLineId, PriceRange, PriceScaleId, PriceScaleMode, SeriesId, SeriesKind,
    TimeRange,
};
use crate::core::{Color, Timestamp, Viewport};
use crate::error::{ScenarioError, ScenarioResult};
use crate::headless::LogicalRange;

const DIGEST_PREFIX: &str = "blake3:";

/// Deterministic record of one produced frame across every chart in a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameCapture {
    pub frame: u64,
    pub viewport: Viewport,
    pub charts: Vec<ChartSnapshot>,
}

impl FrameCapture {
    /// Digest of the canonical JSON encoding, prefixed with `blake3:`.
    pub fn digest(&self) -> ScenarioResult<String> {
        let bytes = serde_json::to_vec(self).map_err(|e| {
            ScenarioError::InvalidData(format!("failed to encode capture: {e}"))
        })?;
        Ok(format!("{DIGEST_PREFIX}{}", blake3::hash(&bytes).to_hex()))
    }

    /// Digest of the visual content only, ignoring the frame counter.
    pub fn content_digest(&self) -> ScenarioResult<String> {
        Self {
            frame: 0,
            ..self.clone()
        }
        .digest()
    }

    pub fn to_json_pretty(&self) -> ScenarioResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScenarioError::InvalidData(format!("failed to serialize capture: {e}")))
    }

    pub fn from_json_str(input: &str) -> ScenarioResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ScenarioError::InvalidData(format!("failed to parse capture: {e}")))
    }

    /// First chart's snapshot, which is the only one for every built-in scenario.
    #[must_use]
    pub fn primary_chart(&self) -> Option<&ChartSnapshot> {
        self.charts.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub attribution_logo: bool,
    pub time_scale: TimeScaleSnapshot,
    pub price_scales: Vec<PriceScaleSnapshot>,
    pub series: Vec<SeriesSnapshot>,
}

impl ChartSnapshot {
    #[must_use]
    pub fn series(&self, id: SeriesId) -> Option<&SeriesSnapshot> {
        self.series.iter().find(|series| series.id == id)
    }

    #[must_use]
    pub fn price_scale(&self, id: &PriceScaleId) -> Option<&PriceScaleSnapshot> {
        self.price_scales.iter().find(|scale| &scale.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeScaleSnapshot {
    pub bar_spacing: f64,
    pub right_offset: f64,
    pub timeline_len: usize,
    pub base_index: Option<i64>,
    pub logical_range: Option<LogicalRange>,
    pub visible_time_range: Option<TimeRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceScaleSnapshot {
    pub id: PriceScaleId,
    pub mode: PriceScaleMode,
    pub visible: bool,
    pub auto_scale: bool,
    pub range: Option<PriceRange>,
}

/// Value of one item at a time coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapturedValue {
    pub time: Timestamp,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLineSnapshot {
    pub id: Option<PriceLineId>,
    pub price: f64,
    pub color: Color,
    pub line_width: u8,
    pub line_style: LineStyle,
    pub line_visible: bool,
    pub title: String,
    pub axis_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub id: SeriesId,
    pub kind: SeriesKind,
    pub price_scale_id: PriceScaleId,
    pub visible: bool,
    pub color: Color,
    pub line_width: u8,
    pub line_style: LineStyle,
    pub item_count: usize,
    pub whitespace_count: usize,
    pub visible_value_count: usize,
    pub first_visible: Option<CapturedValue>,
    pub last_visible: Option<CapturedValue>,
    pub last_value: Option<CapturedValue>,
    pub last_value_label: Option<String>,
    pub color_overrides: usize,
    pub price_line: Option<PriceLineSnapshot>,
    pub price_lines: Vec<PriceLineSnapshot>,
}
