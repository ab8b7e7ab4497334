use crate::api::{
    BarStyleOptions, ChartOptions, LineStyle, PriceScaleId, SeriesKind, SeriesOptions,
    create_chart,
};
use crate::core::{
    Color, DEFAULT_PALETTE, LinePoint, OhlcBar, TimeStepping, colored_series, ohlc_series,
};
use crate::error::ScenarioResult;
use crate::frame::Container;
use crate::scenario::{Completion, Scenario};

pub const POINT_COUNT: usize = 500;

pub const BAR_STYLE: BarStyleOptions = BarStyleOptions {
    up_color: Color::rgba(0, 80, 0, 0.4),
    down_color: Color::rgba(80, 0, 0, 0.4),
    border_color: Some(Color::rgba(0, 0, 255, 0.2)),
    thin_bars: false,
};

pub fn generate_data() -> ScenarioResult<Vec<OhlcBar>> {
    ohlc_series(POINT_COUNT, TimeStepping::daily_from_2018())
}

pub fn generate_line_data(offset: f64) -> ScenarioResult<Vec<LinePoint>> {
    colored_series(
        POINT_COUNT,
        TimeStepping::daily_from_2018(),
        offset,
        &DEFAULT_PALETTE,
    )
}

fn overlay_line_options() -> SeriesOptions {
    SeriesOptions::default()
        .with_line_width(1)
        .with_color(Color::rgb(0xff, 0x00, 0x00))
        .with_price_line(true, 1, LineStyle::LargeDashed)
        .with_price_scale_id(PriceScaleId::overlay(""))
}

/// Bars on the right scale plus two colored lines on the empty-id overlay scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPriceScaleId;

impl Scenario for EmptyPriceScaleId {
    fn id(&self) -> &'static str {
        "empty-price-scale-id"
    }

    fn description(&self) -> &'static str {
        "bar series on the right scale and line series on the \"\" overlay scale"
    }

    fn run_test_case(&self, container: &Container) -> ScenarioResult<Completion> {
        let chart = create_chart(container, ChartOptions::for_capture())?;

        let bars = chart.add_series(
            SeriesKind::Bar,
            SeriesOptions::default()
                .with_bar_style(BAR_STYLE)
                .with_price_scale_id(PriceScaleId::Right),
        )?;
        bars.set_data(generate_data()?)?;

        let first = chart.add_series(SeriesKind::Line, overlay_line_options())?;
        first.set_data(generate_line_data(0.0)?)?;
        let second = chart.add_series(SeriesKind::Line, overlay_line_options())?;
        second.set_data(generate_line_data(10.0)?)?;
        Ok(Completion::Immediate)
    }
}
