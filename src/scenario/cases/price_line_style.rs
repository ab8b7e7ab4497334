use crate::api::{ChartOptions, LineStyle, PriceScaleMode, SeriesKind, SeriesOptions, create_chart};
use crate::core::{Color, LinePoint, LinearValues, TimeStepping, linear_series};
use crate::error::ScenarioResult;
use crate::frame::Container;
use crate::scenario::{Completion, Scenario};

pub const PRICE_LINE_COLOR: Color = Color::rgb(0x92, 0x15, 0x1e);

/// 499 daily points valued `1..=499`.
pub fn generate_data() -> ScenarioResult<Vec<LinePoint>> {
    linear_series(
        499,
        TimeStepping::daily_from_2018(),
        LinearValues::identity().with_index_base(1.0),
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PriceLineStyle;

impl Scenario for PriceLineStyle {
    fn id(&self) -> &'static str {
        "price-line-style"
    }

    fn description(&self) -> &'static str {
        "dashed 2px colored series price line on a percentage price scale"
    }

    fn run_test_case(&self, container: &Container) -> ScenarioResult<Completion> {
        let chart = create_chart(
            container,
            ChartOptions::for_capture().with_right_price_scale_mode(PriceScaleMode::Percentage),
        )?;
        let series = chart.add_series(
            SeriesKind::Line,
            SeriesOptions::default()
                .with_price_line_color(PRICE_LINE_COLOR)
                .with_price_line(true, 2, LineStyle::Dashed),
        )?;
        series.set_data(generate_data()?)?;
        Ok(Completion::Immediate)
    }
}
