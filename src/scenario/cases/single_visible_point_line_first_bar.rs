use crate::api::{
    ChartOptions, LineStyle, PriceRange, SeriesKind, SeriesOptions, TimeRange, TimeScaleOptions,
    create_chart,
};
use crate::core::{Color, LinePoint, TimeStepping, sparse_series};
use crate::error::ScenarioResult;
use crate::frame::Container;
use crate::scenario::{Completion, Scenario};

use super::utc_day;

pub const POINT_COUNT: usize = 500;
pub const PERIOD: usize = 100;

/// One valued point every [`PERIOD`] days, whitespace in between.
pub fn generate_data(offset: f64) -> ScenarioResult<Vec<LinePoint>> {
    sparse_series(POINT_COUNT, TimeStepping::daily_from_2018(), PERIOD, offset)
}

fn series_options() -> SeriesOptions {
    SeriesOptions::default()
        .with_line_width(1)
        .with_color(Color::rgb(0xff, 0x00, 0x00))
        .with_last_value_visible(false)
        .with_autoscale_price_range(PriceRange::new(0.0, 1000.0))
        .with_price_line(false, 1, LineStyle::Dashed)
}

/// Visible range covering only the first bar of two sparse series.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleVisiblePointLineFirstBar;

impl Scenario for SingleVisiblePointLineFirstBar {
    fn id(&self) -> &'static str {
        "single-visible-point-line-first-bar"
    }

    fn description(&self) -> &'static str {
        "line and area series whose only visible valued point is the first bar"
    }

    fn run_test_case(&self, container: &Container) -> ScenarioResult<Completion> {
        let chart = create_chart(
            container,
            ChartOptions::for_capture().with_time_scale(TimeScaleOptions {
                right_offset: 7.0,
                bar_spacing: 50.0,
                ..TimeScaleOptions::default()
            }),
        )?;

        let line = chart.add_series(SeriesKind::Line, series_options())?;
        let area = chart.add_series(SeriesKind::Area, series_options())?;
        line.set_data(generate_data(0.0)?)?;
        area.set_data(generate_data(100.0)?)?;

        chart
            .time_scale()
            .set_visible_range(TimeRange::new(utc_day("2017-12-28")?, utc_day("2018-01-20")?))?;
        Ok(Completion::Immediate)
    }
}
