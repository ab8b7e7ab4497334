use serde::{Deserialize, Serialize};

use crate::error::{ScenarioError, ScenarioResult};

use super::validation::validate_chart_options;

/// Vertical-axis mapping function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceScaleMode {
    /// Uniform spacing in raw price units.
    #[default]
    Normal,
    /// Uniform spacing in log price units.
    Logarithmic,
    /// Percentage delta from the first visible value.
    Percentage,
    /// Indexed-to-100 from the first visible value.
    IndexedTo100,
}

/// Time-scale behavior recognized by the chart facade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeScaleOptions {
    /// Empty space after the last bar, in bars.
    pub right_offset: f64,
    pub bar_spacing: f64,
    pub min_bar_spacing: f64,
    pub fix_left_edge: bool,
    pub fix_right_edge: bool,
    pub shift_visible_range_on_new_bar: bool,
    pub allow_shift_visible_range_on_whitespace_replacement: bool,
}

impl Default for TimeScaleOptions {
    fn default() -> Self {
        Self {
            right_offset: 0.0,
            bar_spacing: 6.0,
            min_bar_spacing: 0.5,
            fix_left_edge: false,
            fix_right_edge: false,
            shift_visible_range_on_new_bar: true,
            allow_shift_visible_range_on_whitespace_replacement: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceScaleOptions {
    pub mode: PriceScaleMode,
    pub visible: bool,
    pub auto_scale: bool,
}

impl PriceScaleOptions {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }
}

impl Default for PriceScaleOptions {
    fn default() -> Self {
        Self {
            mode: PriceScaleMode::Normal,
            visible: true,
            auto_scale: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutOptions {
    pub attribution_logo: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            attribution_logo: true,
        }
    }
}

/// Chart-level configuration passed once to `create_chart`.
///
/// Every category is a closed structure; JSON input with an unrecognized key
/// is rejected instead of being ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartOptions {
    pub time_scale: TimeScaleOptions,
    pub right_price_scale: PriceScaleOptions,
    pub left_price_scale: PriceScaleOptions,
    pub layout: LayoutOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            time_scale: TimeScaleOptions::default(),
            right_price_scale: PriceScaleOptions::default(),
            left_price_scale: PriceScaleOptions::hidden(),
            layout: LayoutOptions::default(),
        }
    }
}

impl ChartOptions {
    /// Default options without the attribution logo, as every capture fixture uses.
    #[must_use]
    pub fn for_capture() -> Self {
        Self {
            layout: LayoutOptions {
                attribution_logo: false,
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_time_scale(mut self, time_scale: TimeScaleOptions) -> Self {
        self.time_scale = time_scale;
        self
    }

    #[must_use]
    pub fn with_right_price_scale_mode(mut self, mode: PriceScaleMode) -> Self {
        self.right_price_scale.mode = mode;
        self
    }

    #[must_use]
    pub fn with_left_price_scale(mut self, options: PriceScaleOptions) -> Self {
        self.left_price_scale = options;
        self
    }

    pub fn validate(self) -> ScenarioResult<Self> {
        validate_chart_options(self)
    }

    /// Serializes options to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ScenarioResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ScenarioError::InvalidOptions(format!("failed to serialize options: {e}")))
    }

    /// Parses and validates options from JSON, rejecting unknown keys.
    pub fn from_json_str(input: &str) -> ScenarioResult<Self> {
        let options: Self = serde_json::from_str(input)
            .map_err(|e| ScenarioError::InvalidOptions(format!("failed to parse options: {e}")))?;
        options.validate()
    }
}
