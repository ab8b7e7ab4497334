use crate::api::{ChartOptions, SeriesKind, SeriesOptions, TimeScaleOptions, create_chart};
use crate::core::{Color, LinePoint, Timestamp, fixed_series};
use crate::error::ScenarioResult;
use crate::frame::Container;
use crate::scenario::{Completion, Scenario};

pub const REPLACED_TIME: &str = "2019-04-17";
pub const REPLACED_VALUE: f64 = 84.43;

const SERIES_ONE: [(&str, f64); 6] = [
    ("2019-04-11", 80.01),
    ("2019-04-12", 96.63),
    ("2019-04-13", 76.64),
    ("2019-04-14", 81.89),
    ("2019-04-15", 74.43),
    ("2019-04-16", 80.01),
];

const SERIES_TWO_WHITESPACE: [&str; 4] = ["2019-04-17", "2019-04-18", "2019-04-19", "2019-04-20"];

pub fn generate_data() -> ScenarioResult<Vec<LinePoint>> {
    let items = SERIES_ONE
        .iter()
        .map(|(day, value)| Ok((Timestamp::business_day(day)?, Some(*value))))
        .collect::<ScenarioResult<Vec<_>>>()?;
    Ok(fixed_series(&items))
}

/// Time-only points extending the timeline past the last valued bar.
pub fn generate_whitespace_data() -> ScenarioResult<Vec<LinePoint>> {
    SERIES_TWO_WHITESPACE
        .iter()
        .map(|day| Ok(LinePoint::whitespace(Timestamp::business_day(day)?)))
        .collect()
}

/// Filling a whitespace slot with a value must not scroll the visible range,
/// even with shift-on-new-bar enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoNotShiftRangeWhenReplacingWhitespace;

impl Scenario for DoNotShiftRangeWhenReplacingWhitespace {
    fn id(&self) -> &'static str {
        "do-not-shift-range-when-replacing-whitespace"
    }

    fn description(&self) -> &'static str {
        "update into an existing whitespace slot keeps the visible range"
    }

    fn run_test_case(&self, container: &Container) -> ScenarioResult<Completion> {
        let chart = create_chart(
            container,
            ChartOptions::for_capture().with_time_scale(TimeScaleOptions {
                bar_spacing: 30.0,
                right_offset: 10.0,
                shift_visible_range_on_new_bar: true,
                ..TimeScaleOptions::default()
            }),
        )?;
        let first = chart.add_series(
            SeriesKind::Line,
            SeriesOptions::default().with_color(Color::rgb(0xff, 0x00, 0x00)),
        )?;
        first.set_data(generate_data()?)?;

        let frames = container.frames();
        Ok(Completion::deferred(async move {
            frames.next_frame().await;
            let second = chart.add_series(
                SeriesKind::Line,
                SeriesOptions::default().with_color(Color::rgb(0x00, 0x00, 0xff)),
            )?;
            second.set_data(generate_whitespace_data()?)?;

            frames.next_frame().await;
            first.update(LinePoint::new(
                Timestamp::business_day(REPLACED_TIME)?,
                REPLACED_VALUE,
            ))?;

            frames.next_frame().await;
            Ok(())
        }))
    }
}
