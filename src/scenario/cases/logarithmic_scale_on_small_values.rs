use crate::api::{ChartOptions, PriceScaleMode, SeriesKind, SeriesOptions, create_chart};
use crate::core::{LinePoint, LinearValues, TimeStepping, linear_series};
use crate::error::ScenarioResult;
use crate::frame::Container;
use crate::scenario::{Completion, Scenario};

pub const VALUE_SCALE: f64 = 1e-9;

/// 100 points on integer times with values `i * 1e-9`.
pub fn generate_data() -> ScenarioResult<Vec<LinePoint>> {
    linear_series(
        100,
        TimeStepping::Index { start: 0 },
        LinearValues::scaled(VALUE_SCALE),
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogarithmicScaleOnSmallValues;

impl Scenario for LogarithmicScaleOnSmallValues {
    fn id(&self) -> &'static str {
        "logarithmic-scale-on-small-values"
    }

    fn description(&self) -> &'static str {
        "area series of 1e-9 sized values on a logarithmic price scale"
    }

    fn run_test_case(&self, container: &Container) -> ScenarioResult<Completion> {
        let chart = create_chart(
            container,
            ChartOptions::for_capture().with_right_price_scale_mode(PriceScaleMode::Logarithmic),
        )?;
        let series = chart.add_series(
            SeriesKind::Area,
            SeriesOptions::default().with_price_format(9, VALUE_SCALE),
        )?;
        series.set_data(generate_data()?)?;
        chart.time_scale().fit_content()?;
        Ok(Completion::Immediate)
    }
}
