use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{ScenarioError, ScenarioResult};

use super::LineStyle;
use super::validation::validate_price_line_options;

/// Static horizontal reference line attached to a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceLineOptions {
    pub price: f64,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default = "default_line_width")]
    pub line_width: u8,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default = "default_true")]
    pub line_visible: bool,
    #[serde(default = "default_true")]
    pub axis_label_visible: bool,
    #[serde(default)]
    pub title: String,
}

impl PriceLineOptions {
    #[must_use]
    pub fn new(price: f64) -> Self {
        Self {
            price,
            color: None,
            line_width: default_line_width(),
            line_style: LineStyle::Solid,
            line_visible: true,
            axis_label_visible: true,
            title: String::new(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, line_width: u8, line_style: LineStyle) -> Self {
        self.line_width = line_width;
        self.line_style = line_style;
        self
    }

    #[must_use]
    pub fn with_axis_label_visible(mut self, visible: bool) -> Self {
        self.axis_label_visible = visible;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn validate(self) -> ScenarioResult<Self> {
        validate_price_line_options(self)
    }

    pub fn from_json_str(input: &str) -> ScenarioResult<Self> {
        let options: Self = serde_json::from_str(input).map_err(|e| {
            ScenarioError::InvalidOptions(format!("failed to parse price line options: {e}"))
        })?;
        options.validate()
    }
}

fn default_line_width() -> u8 {
    1
}

fn default_true() -> bool {
    true
}
