use std::cell::RefCell;
use std::rc::Rc;

use chart_scenarios::api::{ChartOptions, SeriesKind, SeriesOptions, create_chart};
use chart_scenarios::core::{LinePoint, Timestamp, Viewport};
use chart_scenarios::frame::{Container, FrameInfo};
use chart_scenarios::scenario::{
    Completion, HarnessConfig, Scenario, ScenarioRunner, find_scenario,
};
use chart_scenarios::{ScenarioError, ScenarioResult};
use futures_util::FutureExt;

/// Loads three points, then applies two chained frame-aligned updates.
struct ChainedUpdates;

impl Scenario for ChainedUpdates {
    fn id(&self) -> &'static str {
        "chained-updates"
    }

    fn run_test_case(&self, container: &Container) -> ScenarioResult<Completion> {
        let chart = create_chart(container, ChartOptions::for_capture())?;
        let series = chart.add_series(SeriesKind::Line, SeriesOptions::default())?;
        series.set_data(vec![
            LinePoint::new(Timestamp::Unix(0), 1.0),
            LinePoint::new(Timestamp::Unix(1), 2.0),
            LinePoint::new(Timestamp::Unix(2), 3.0),
        ])?;

        let frames = container.frames();
        Ok(Completion::deferred(async move {
            frames.next_frame().await;
            series.update(LinePoint::new(Timestamp::Unix(3), 30.0))?;
            frames.next_frame().await;
            series.update(LinePoint::new(Timestamp::Unix(4), 40.0))?;
            frames.next_frame().await;
            Ok(())
        }))
    }
}

/// Waits on a frame that never comes.
struct NeverRendered;

impl Scenario for NeverRendered {
    fn id(&self) -> &'static str {
        "never-rendered"
    }

    fn run_test_case(&self, container: &Container) -> ScenarioResult<Completion> {
        create_chart(container, ChartOptions::for_capture())?;
        container.detach();
        let frames = container.frames();
        Ok(Completion::deferred(async move {
            frames.next_frame().await;
            Ok(())
        }))
    }
}

fn last_value(capture: &chart_scenarios::render::FrameCapture) -> Option<f64> {
    capture.primary_chart()?.series.first()?.last_value.map(|value| value.value)
}

#[test]
fn intermediate_frames_reflect_one_mutation_at_a_time() {
    let run = ScenarioRunner::default()
        .run(&ChainedUpdates)
        .expect("scenario run");

    assert!(run.deferred);
    assert_eq!(run.frames.len(), 4);
    assert_eq!(run.final_capture.frame, 4);

    let item_counts: Vec<usize> = run
        .frames
        .iter()
        .map(|capture| capture.primary_chart().expect("chart").series[0].item_count)
        .collect();
    assert_eq!(item_counts, vec![3, 4, 5, 5]);

    assert_eq!(last_value(run.frame(1).expect("frame 1")), Some(3.0));
    assert_eq!(last_value(run.frame(2).expect("frame 2")), Some(30.0));
    assert_eq!(last_value(run.frame(3).expect("frame 3")), Some(40.0));
    assert_eq!(last_value(&run.final_capture), Some(40.0));
}

#[test]
fn continuations_run_after_the_frame_that_follows_scheduling() {
    let container = Container::new(Viewport::default());
    let frames = container.frames();
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let first_log = Rc::clone(&log);
    let chained_frames = frames.clone();
    frames.request_frame(move |info| {
        first_log.borrow_mut().push(format!("a@{}", info.index));
        let nested_log = Rc::clone(&first_log);
        chained_frames.request_frame(move |info| {
            nested_log.borrow_mut().push(format!("c@{}", info.index));
        });
    });
    let second_log = Rc::clone(&log);
    frames.request_frame(move |info| second_log.borrow_mut().push(format!("b@{}", info.index)));

    assert!(log.borrow().is_empty());
    container.tick().expect("tick").expect("frame 1");
    assert_eq!(*log.borrow(), vec!["a@1", "b@1"]);

    container.tick().expect("tick").expect("frame 2");
    assert_eq!(*log.borrow(), vec!["a@1", "b@1", "c@2"]);
    assert_eq!(frames.pending_callbacks(), 0);
}

#[test]
fn captured_frame_precedes_the_continuations_it_releases() {
    let container = Container::new(Viewport::default());
    let chart = create_chart(&container, ChartOptions::for_capture()).expect("chart");
    let series = chart
        .add_series(SeriesKind::Line, SeriesOptions::default())
        .expect("series");
    series
        .set_data(vec![LinePoint::new(Timestamp::Unix(0), 1.0)])
        .expect("set data");

    let update_target = series.clone();
    container.frames().request_frame(move |_| {
        update_target
            .update(LinePoint::new(Timestamp::Unix(1), 2.0))
            .expect("update");
    });

    let first = container.tick().expect("tick").expect("frame");
    assert_eq!(first.primary_chart().expect("chart").series[0].item_count, 1);
    let second = container.tick().expect("tick").expect("frame");
    assert_eq!(second.primary_chart().expect("chart").series[0].item_count, 2);
}

#[test]
fn next_frame_resolves_only_after_a_later_frame() {
    let container = Container::new(Viewport::default());
    container.tick().expect("tick").expect("frame 1");

    let frames = container.frames();
    let mut pending = frames.next_frame();
    assert!((&mut pending).now_or_never().is_none());

    container.tick().expect("tick").expect("frame 2");
    assert_eq!(
        (&mut pending).now_or_never(),
        Some(FrameInfo { index: 2 })
    );
}

#[test]
fn zero_size_container_never_produces_frames() {
    let container = Container::new(Viewport::new(0, 400));
    let frames = container.frames();
    let mut pending = frames.next_frame();

    for _ in 0..5 {
        assert!(container.tick().expect("tick").is_none());
    }
    assert_eq!(frames.frames_rendered(), 0);
    assert!((&mut pending).now_or_never().is_none());
}

#[test]
fn zero_size_container_exhausts_the_frame_budget() {
    let runner = ScenarioRunner::new(
        HarnessConfig::default()
            .with_viewport(Viewport::new(0, 0))
            .with_frame_budget(8),
    );
    let scenario = find_scenario("fix-left-edge").expect("builtin scenario");

    let err = runner
        .run(scenario.as_ref())
        .expect_err("zero-size container must not complete");
    assert!(matches!(
        err,
        ScenarioError::FrameBudgetExhausted { ref scenario, frames: 8 } if scenario == "fix-left-edge"
    ));
}

#[test]
fn zero_size_container_keeps_visible_range_scenario_pending() {
    let runner = ScenarioRunner::new(
        HarnessConfig::default()
            .with_viewport(Viewport::new(0, 400))
            .with_frame_budget(6),
    );
    let scenario =
        find_scenario("single-visible-point-line-first-bar").expect("builtin scenario");

    let err = runner
        .run(scenario.as_ref())
        .expect_err("zero-width container must not complete");
    assert!(matches!(err, ScenarioError::FrameBudgetExhausted { frames: 6, .. }));
}

#[test]
fn detached_container_leaves_deferred_completion_pending() {
    let runner = ScenarioRunner::new(HarnessConfig::default().with_frame_budget(4));
    let container = Container::new(Viewport::default());

    let err = runner
        .run_in(&NeverRendered, &container)
        .expect_err("detached container must not complete");
    assert!(matches!(err, ScenarioError::FrameBudgetExhausted { frames: 4, .. }));
    assert!(!container.is_attached());
    assert_eq!(container.frames().frames_rendered(), 0);

    container.attach();
    assert!(container.tick().expect("tick").is_some());
}
