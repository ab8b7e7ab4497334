use crate::api::{
    ChartOptions, LineStyle, PriceLineOptions, SeriesKind, SeriesOptions, create_chart,
};
use crate::core::{Color, LinePoint, LinearValues, TimeStepping, linear_series};
use crate::error::ScenarioResult;
use crate::frame::Container;
use crate::scenario::{Completion, Scenario};

pub const PRICE_LINE_PRICE: f64 = 980.0;
pub const PRICE_LINE_TITLE: &str = "P/L: 500";
pub const PRICE_LINE_COLOR: Color = Color::rgb(0xbe, 0x12, 0x38);

pub fn generate_data() -> ScenarioResult<Vec<LinePoint>> {
    linear_series(1000, TimeStepping::daily_from_2018(), LinearValues::identity())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SetPriceLineLabel;

impl Scenario for SetPriceLineLabel {
    fn id(&self) -> &'static str {
        "set-price-line-label"
    }

    fn description(&self) -> &'static str {
        "created price line with a title and a visible axis label"
    }

    fn run_test_case(&self, container: &Container) -> ScenarioResult<Completion> {
        let chart = create_chart(container, ChartOptions::for_capture())?;
        let series = chart.add_series(SeriesKind::Line, SeriesOptions::default())?;
        series.set_data(generate_data()?)?;
        series.create_price_line(
            PriceLineOptions::new(PRICE_LINE_PRICE)
                .with_color(PRICE_LINE_COLOR)
                .with_stroke(2, LineStyle::Dotted)
                .with_axis_label_visible(true)
                .with_title(PRICE_LINE_TITLE),
        )?;
        Ok(Completion::Immediate)
    }
}
