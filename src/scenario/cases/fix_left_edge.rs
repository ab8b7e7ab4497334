use crate::api::{ChartOptions, SeriesKind, SeriesOptions, TimeScaleOptions, create_chart};
use crate::core::{LinePoint, LinearValues, TimeStepping, linear_series};
use crate::error::ScenarioResult;
use crate::frame::Container;
use crate::scenario::{Completion, Scenario};

pub fn generate_data() -> ScenarioResult<Vec<LinePoint>> {
    linear_series(20, TimeStepping::daily_from_2018(), LinearValues::identity())
}

/// Few points with the left edge pinned: the first bar sits at the left border.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixLeftEdge;

impl Scenario for FixLeftEdge {
    fn id(&self) -> &'static str {
        "fix-left-edge"
    }

    fn description(&self) -> &'static str {
        "20 daily points with timeScale.fixLeftEdge"
    }

    fn run_test_case(&self, container: &Container) -> ScenarioResult<Completion> {
        let chart = create_chart(
            container,
            ChartOptions::for_capture().with_time_scale(TimeScaleOptions {
                fix_left_edge: true,
                ..TimeScaleOptions::default()
            }),
        )?;
        let series = chart.add_series(SeriesKind::Line, SeriesOptions::default())?;
        series.set_data(generate_data()?)?;
        Ok(Completion::Immediate)
    }
}
