use crate::core::Color;
use crate::error::{ScenarioError, ScenarioResult};

use super::{ChartOptions, PriceLineOptions, PriceRange, SeriesKind, SeriesOptions};

const MAX_LINE_WIDTH: u8 = 4;
const MAX_PRICE_PRECISION: u8 = 15;

pub(super) fn validate_chart_options(options: ChartOptions) -> ScenarioResult<ChartOptions> {
    let time_scale = options.time_scale;
    if !time_scale.bar_spacing.is_finite() || time_scale.bar_spacing <= 0.0 {
        return Err(ScenarioError::InvalidOptions(
            "time_scale.bar_spacing must be finite and > 0".to_owned(),
        ));
    }
    if !time_scale.min_bar_spacing.is_finite() || time_scale.min_bar_spacing <= 0.0 {
        return Err(ScenarioError::InvalidOptions(
            "time_scale.min_bar_spacing must be finite and > 0".to_owned(),
        ));
    }
    if time_scale.bar_spacing < time_scale.min_bar_spacing {
        return Err(ScenarioError::InvalidOptions(
            "time_scale.bar_spacing must be >= time_scale.min_bar_spacing".to_owned(),
        ));
    }
    if !time_scale.right_offset.is_finite() {
        return Err(ScenarioError::InvalidOptions(
            "time_scale.right_offset must be finite".to_owned(),
        ));
    }
    Ok(options)
}

pub(super) fn validate_series_options(
    kind: SeriesKind,
    options: SeriesOptions,
) -> ScenarioResult<SeriesOptions> {
    validate_line_width("line_width", options.line_width)?;
    validate_line_width("price_line_width", options.price_line_width)?;

    if options.price_format.precision > MAX_PRICE_PRECISION {
        return Err(ScenarioError::InvalidOptions(format!(
            "price_format.precision must be <= {MAX_PRICE_PRECISION}"
        )));
    }
    let min_move = options.price_format.min_move;
    if !min_move.is_finite() || min_move <= 0.0 {
        return Err(ScenarioError::InvalidOptions(
            "price_format.min_move must be finite and > 0".to_owned(),
        ));
    }

    if let Some(range) = options.autoscale_price_range {
        validate_price_range(range)?;
    }

    for color in [options.color, options.price_line_color].into_iter().flatten() {
        validate_color(color)?;
    }

    if let Some(style) = options.bar_style {
        if !matches!(kind, SeriesKind::Bar | SeriesKind::Candlestick) {
            return Err(ScenarioError::InvalidOptions(format!(
                "bar_style is not recognized for {kind:?} series"
            )));
        }
        for color in [Some(style.up_color), Some(style.down_color), style.border_color]
            .into_iter()
            .flatten()
        {
            validate_color(color)?;
        }
    }

    Ok(options)
}

pub(super) fn validate_price_line_options(
    options: PriceLineOptions,
) -> ScenarioResult<PriceLineOptions> {
    if !options.price.is_finite() {
        return Err(ScenarioError::InvalidOptions(
            "price line price must be finite".to_owned(),
        ));
    }
    validate_line_width("price line line_width", options.line_width)?;
    if let Some(color) = options.color {
        validate_color(color)?;
    }
    Ok(options)
}

fn validate_color(color: Color) -> ScenarioResult<()> {
    color.validate().map_err(|err| match err {
        ScenarioError::InvalidData(message) => ScenarioError::InvalidOptions(message),
        other => other,
    })
}

fn validate_line_width(name: &str, width: u8) -> ScenarioResult<()> {
    if !(1..=MAX_LINE_WIDTH).contains(&width) {
        return Err(ScenarioError::InvalidOptions(format!(
            "{name} must be between 1 and {MAX_LINE_WIDTH}"
        )));
    }
    Ok(())
}

fn validate_price_range(range: PriceRange) -> ScenarioResult<()> {
    if !range.min_value.is_finite() || !range.max_value.is_finite() {
        return Err(ScenarioError::InvalidOptions(
            "autoscale price range bounds must be finite".to_owned(),
        ));
    }
    if range.min_value > range.max_value {
        return Err(ScenarioError::InvalidOptions(
            "autoscale price range min must be <= max".to_owned(),
        ));
    }
    Ok(())
}
