use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Color, DataShape};
use crate::error::{ScenarioError, ScenarioResult};

use super::validation::validate_series_options;

/// Series families recognized by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Area,
    Baseline,
    Histogram,
    Bar,
    Candlestick,
}

impl SeriesKind {
    #[must_use]
    pub const fn data_shape(self) -> DataShape {
        match self {
            Self::Line | Self::Area | Self::Baseline | Self::Histogram => DataShape::SingleValue,
            Self::Bar | Self::Candlestick => DataShape::Ohlc,
        }
    }

    /// Color used when neither the series nor a point overrides it.
    #[must_use]
    pub const fn default_color(self) -> Color {
        match self {
            Self::Line | Self::Area | Self::Baseline => Color::rgb(0x21, 0x96, 0xf3),
            Self::Histogram | Self::Bar | Self::Candlestick => Color::rgb(0x26, 0xa6, 0x9a),
        }
    }
}

/// Stroke pattern shared by series lines and price lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
    LargeDashed,
    SparseDotted,
}

/// Price scale a series is attached to.
///
/// `"right"` and `"left"` name the visible side scales; any other string,
/// including the empty one, names an overlay scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum PriceScaleId {
    #[default]
    Right,
    Left,
    Overlay(String),
}

impl PriceScaleId {
    #[must_use]
    pub fn overlay(id: impl Into<String>) -> Self {
        Self::Overlay(id.into())
    }

    #[must_use]
    pub fn is_overlay(&self) -> bool {
        matches!(self, Self::Overlay(_))
    }
}

impl From<String> for PriceScaleId {
    fn from(value: String) -> Self {
        match value.as_str() {
            "right" => Self::Right,
            "left" => Self::Left,
            _ => Self::Overlay(value),
        }
    }
}

impl From<&str> for PriceScaleId {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<PriceScaleId> for String {
    fn from(value: PriceScaleId) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PriceScaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Right => f.write_str("right"),
            Self::Left => f.write_str("left"),
            Self::Overlay(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceFormat {
    pub precision: u8,
    pub min_move: f64,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            precision: 2,
            min_move: 0.01,
        }
    }
}

/// Closed price interval used for autoscale overrides and captured ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceRange {
    pub min_value: f64,
    pub max_value: f64,
}

impl PriceRange {
    #[must_use]
    pub fn new(min_value: f64, max_value: f64) -> Self {
        Self {
            min_value,
            max_value,
        }
    }

    #[must_use]
    pub fn point(value: f64) -> Self {
        Self::new(value, value)
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self::new(
            self.min_value.min(other.min_value),
            self.max_value.max(other.max_value),
        )
    }

    #[must_use]
    pub fn include(self, value: f64) -> Self {
        self.merge(Self::point(value))
    }
}

/// Bar/candlestick coloring; only accepted for OHLC series kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BarStyleOptions {
    pub up_color: Color,
    pub down_color: Color,
    pub border_color: Option<Color>,
    pub thin_bars: bool,
}

impl Default for BarStyleOptions {
    fn default() -> Self {
        Self {
            up_color: Color::rgb(0x26, 0xa6, 0x9a),
            down_color: Color::rgb(0xef, 0x53, 0x50),
            border_color: None,
            thin_bars: true,
        }
    }
}

/// Display options fixed at series creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeriesOptions {
    pub color: Option<Color>,
    pub line_width: u8,
    pub line_style: LineStyle,
    pub visible: bool,
    pub title: String,
    pub price_line_visible: bool,
    pub price_line_width: u8,
    pub price_line_color: Option<Color>,
    pub price_line_style: LineStyle,
    pub last_value_visible: bool,
    pub price_scale_id: PriceScaleId,
    pub price_format: PriceFormat,
    pub autoscale_price_range: Option<PriceRange>,
    pub bar_style: Option<BarStyleOptions>,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            color: None,
            line_width: 3,
            line_style: LineStyle::Solid,
            visible: true,
            title: String::new(),
            price_line_visible: true,
            price_line_width: 1,
            price_line_color: None,
            price_line_style: LineStyle::Dashed,
            last_value_visible: true,
            price_scale_id: PriceScaleId::Right,
            price_format: PriceFormat::default(),
            autoscale_price_range: None,
            bar_style: None,
        }
    }
}

impl SeriesOptions {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: u8) -> Self {
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_price_line(mut self, visible: bool, width: u8, style: LineStyle) -> Self {
        self.price_line_visible = visible;
        self.price_line_width = width;
        self.price_line_style = style;
        self
    }

    #[must_use]
    pub fn with_price_line_color(mut self, color: Color) -> Self {
        self.price_line_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_last_value_visible(mut self, visible: bool) -> Self {
        self.last_value_visible = visible;
        self
    }

    #[must_use]
    pub fn with_price_scale_id(mut self, id: impl Into<PriceScaleId>) -> Self {
        self.price_scale_id = id.into();
        self
    }

    #[must_use]
    pub fn with_price_format(mut self, precision: u8, min_move: f64) -> Self {
        self.price_format = PriceFormat {
            precision,
            min_move,
        };
        self
    }

    #[must_use]
    pub fn with_autoscale_price_range(mut self, range: PriceRange) -> Self {
        self.autoscale_price_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_bar_style(mut self, style: BarStyleOptions) -> Self {
        self.bar_style = Some(style);
        self
    }

    /// Resolved series color.
    #[must_use]
    pub fn effective_color(&self, kind: SeriesKind) -> Color {
        self.color.unwrap_or_else(|| kind.default_color())
    }

    pub fn validate(self, kind: SeriesKind) -> ScenarioResult<Self> {
        validate_series_options(kind, self)
    }

    /// Parses and validates options for `kind`, rejecting unknown keys.
    pub fn from_json_str(kind: SeriesKind, input: &str) -> ScenarioResult<Self> {
        let options: Self = serde_json::from_str(input).map_err(|e| {
            ScenarioError::InvalidOptions(format!("failed to parse series options: {e}"))
        })?;
        options.validate(kind)
    }
}
