use chart_scenarios::ScenarioError;
use chart_scenarios::api::{LineStyle, PriceScaleId, PriceScaleMode, SeriesKind};
use chart_scenarios::core::{Color, Timestamp, Viewport};
use chart_scenarios::render::{ChartSnapshot, FrameCapture};
use chart_scenarios::scenario::cases::{
    do_not_shift_range_when_replacing_whitespace as whitespace, empty_price_scale_id,
    price_line_style, set_price_line_label, single_visible_point_line_first_bar,
};
use chart_scenarios::scenario::{
    HarnessConfig, ScenarioRun, ScenarioRunner, UPDATE_BASELINES_ENV, builtin_scenarios,
    find_scenario,
};

fn run(id: &str) -> ScenarioRun {
    let scenario = find_scenario(id).expect("builtin scenario");
    ScenarioRunner::default()
        .run(scenario.as_ref())
        .expect("scenario run")
}

fn chart(capture: &FrameCapture) -> &ChartSnapshot {
    capture.primary_chart().expect("chart snapshot")
}

#[test]
fn builtin_corpus_is_listed_in_order() {
    let ids: Vec<&str> = builtin_scenarios()
        .iter()
        .map(|scenario| scenario.id())
        .collect();
    assert_eq!(
        ids,
        vec![
            "fix-left-edge",
            "price-line-style",
            "set-price-line-label",
            "logarithmic-scale-on-small-values",
            "single-visible-point-line-first-bar",
            "do-not-shift-range-when-replacing-whitespace",
            "empty-price-scale-id",
        ]
    );
    assert!(find_scenario("does-not-exist").is_none());
    assert!(
        builtin_scenarios()
            .iter()
            .all(|scenario| !scenario.description().is_empty())
    );
}

#[test]
fn every_builtin_scenario_completes_within_default_budget() {
    let runner = ScenarioRunner::default();
    for scenario in builtin_scenarios() {
        let run = runner.run(scenario.as_ref()).expect("scenario run");
        assert_eq!(run.id, scenario.id());
        assert_eq!(run.final_capture.viewport, Viewport::new(600, 400));
        assert_eq!(run.final_capture.charts.len(), 1);
        assert!(!chart(&run.final_capture).attribution_logo);
        assert_eq!(run.frames.last(), Some(&run.final_capture));
    }
}

#[test]
fn runs_are_deterministic() {
    for scenario in builtin_scenarios() {
        let runner = ScenarioRunner::default();
        let first = runner.run(scenario.as_ref()).expect("first run");
        let second = runner.run(scenario.as_ref()).expect("second run");
        assert_eq!(
            first.final_capture.digest().expect("digest"),
            second.final_capture.digest().expect("digest")
        );
    }
}

#[test]
fn fix_left_edge_pins_first_bar_to_left_border() {
    let run = run("fix-left-edge");
    assert!(!run.deferred);
    assert_eq!(run.frames.len(), 1);

    let snapshot = chart(&run.final_capture);
    let range = snapshot.time_scale.logical_range.expect("range");
    approx::assert_abs_diff_eq!(range.from, 0.0, epsilon = 1e-9);

    let series = &snapshot.series[0];
    assert_eq!(series.visible_value_count, 20);
    assert_eq!(
        series.first_visible.map(|value| value.time),
        Some(Timestamp::Unix(1_514_764_800))
    );
}

#[test]
fn price_line_style_uses_dashed_two_pixel_line_on_percentage_scale() {
    let run = run("price-line-style");
    let snapshot = chart(&run.final_capture);
    assert_eq!(
        snapshot
            .price_scale(&PriceScaleId::Right)
            .expect("right scale")
            .mode,
        PriceScaleMode::Percentage
    );

    let series = &snapshot.series[0];
    assert_eq!(series.color, SeriesKind::Line.default_color());
    assert_eq!(series.item_count, 499);
    let price_line = series.price_line.as_ref().expect("series price line");
    assert_eq!(price_line.line_width, 2);
    assert_eq!(price_line.line_style, LineStyle::Dashed);
    assert!((price_line.price - 499.0).abs() <= 1e-9);
    assert_eq!(price_line.color, price_line_style::PRICE_LINE_COLOR);
    assert_eq!(price_line.color, Color::rgb(0x92, 0x15, 0x1e));
}

#[test]
fn set_price_line_label_shows_title_and_axis_label() {
    let run = run("set-price-line-label");
    let series = &chart(&run.final_capture).series[0];
    assert_eq!(series.price_lines.len(), 1);

    let line = &series.price_lines[0];
    assert!((line.price - set_price_line_label::PRICE_LINE_PRICE).abs() <= 1e-9);
    assert_eq!(line.title, set_price_line_label::PRICE_LINE_TITLE);
    assert_eq!(line.axis_label.as_deref(), Some("980.00"));
    assert_eq!(line.color, set_price_line_label::PRICE_LINE_COLOR);
    assert_eq!(line.line_width, 2);
    assert_eq!(line.line_style, LineStyle::Dotted);
}

#[test]
fn logarithmic_scale_keeps_nano_precision() {
    let run = run("logarithmic-scale-on-small-values");
    let snapshot = chart(&run.final_capture);

    let scale = snapshot
        .price_scale(&PriceScaleId::Right)
        .expect("right scale");
    assert_eq!(scale.mode, PriceScaleMode::Logarithmic);
    let range = scale.range.expect("range");
    approx::assert_abs_diff_eq!(range.min_value, 0.0, epsilon = 1e-18);
    approx::assert_abs_diff_eq!(range.max_value, 99e-9, epsilon = 1e-18);

    let series = &snapshot.series[0];
    assert_eq!(series.kind, SeriesKind::Area);
    assert_eq!(series.visible_value_count, 100);
    assert_eq!(series.last_value_label.as_deref(), Some("0.000000099"));
}

#[test]
fn single_visible_point_shows_only_first_bar() {
    let run = run("single-visible-point-line-first-bar");
    let snapshot = chart(&run.final_capture);

    let visible = snapshot.time_scale.visible_time_range.expect("visible range");
    assert_eq!(visible.from, Timestamp::Unix(1_514_764_800));
    assert_eq!(
        visible.to,
        Timestamp::business_day("2018-01-20").expect("day")
    );

    let expected_first = [0.0, 100.0];
    for (series, expected) in snapshot.series.iter().zip(expected_first) {
        assert_eq!(series.item_count, single_visible_point_line_first_bar::POINT_COUNT);
        assert_eq!(series.whitespace_count, 495);
        assert_eq!(series.visible_value_count, 1);
        assert_eq!(series.first_visible.map(|value| value.value), Some(expected));
        assert!(series.price_line.is_none());
        assert!(series.last_value_label.is_none());
    }

    let range = snapshot
        .price_scale(&PriceScaleId::Right)
        .and_then(|scale| scale.range)
        .expect("autoscale range");
    assert_eq!((range.min_value, range.max_value), (0.0, 1000.0));
}

#[test]
fn replacing_whitespace_updates_value_without_shifting_range() {
    let run = run("do-not-shift-range-when-replacing-whitespace");
    assert!(run.deferred);
    assert_eq!(run.frames.len(), 4);

    let before_second_series = chart(run.frame(1).expect("frame 1"));
    assert_eq!(before_second_series.series.len(), 1);
    assert_eq!(before_second_series.time_scale.timeline_len, 6);

    let before_update = chart(run.frame(2).expect("frame 2"));
    assert_eq!(before_update.series.len(), 2);
    assert_eq!(before_update.time_scale.timeline_len, 10);
    assert_eq!(before_update.series[1].whitespace_count, 4);

    let after_update = chart(&run.final_capture);
    let updated = after_update.series[0].last_value.expect("last value");
    assert_eq!(
        updated.time,
        Timestamp::business_day(whitespace::REPLACED_TIME).expect("day")
    );
    assert!((updated.value - whitespace::REPLACED_VALUE).abs() <= 1e-9);
    assert_eq!(after_update.time_scale.timeline_len, 10);
    assert_eq!(after_update.time_scale.base_index, Some(6));

    assert_eq!(
        before_update.time_scale.logical_range,
        after_update.time_scale.logical_range
    );
    assert_eq!(
        before_update.time_scale.visible_time_range,
        after_update.time_scale.visible_time_range
    );
}

#[test]
fn empty_price_scale_id_places_lines_on_overlay_scale() {
    let run = run("empty-price-scale-id");
    let snapshot = chart(&run.final_capture);
    assert_eq!(snapshot.series.len(), 3);

    let bars = &snapshot.series[0];
    assert_eq!(bars.kind, SeriesKind::Bar);
    assert_eq!(bars.price_scale_id, PriceScaleId::Right);

    let overlay = PriceScaleId::overlay("");
    for line in &snapshot.series[1..] {
        assert_eq!(line.kind, SeriesKind::Line);
        assert_eq!(line.price_scale_id, overlay);
        assert_eq!(line.line_width, 1);
        assert_eq!(line.color_overrides, 334);
        let price_line = line.price_line.as_ref().expect("price line");
        assert_eq!(price_line.line_style, LineStyle::LargeDashed);
    }

    let overlay_scale = snapshot.price_scale(&overlay).expect("overlay scale");
    assert!(!overlay_scale.visible);
    let range = overlay_scale.range.expect("overlay range");
    assert_eq!((range.min_value, range.max_value), (400.0, 509.0));

    let right = snapshot
        .price_scale(&PriceScaleId::Right)
        .and_then(|scale| scale.range)
        .expect("right range");
    assert!(right.min_value < right.max_value);
    assert!(empty_price_scale_id::BAR_STYLE.border_color.is_some());
}

#[test]
fn harness_config_defaults_and_json() {
    let config = HarnessConfig::default();
    assert_eq!(config.viewport, Viewport::new(600, 400));
    assert_eq!(config.frame_budget, 16);
    assert!(!config.update_baselines);
    assert_eq!(
        config.baseline_path("fix-left-edge"),
        config.baseline_dir.join("fix-left-edge.json")
    );

    let parsed = HarnessConfig::from_json_str(r#"{"frame_budget": 4}"#).expect("config");
    assert_eq!(parsed.frame_budget, 4);
    assert_eq!(parsed.viewport, config.viewport);

    let json = parsed.to_json_pretty().expect("serialize");
    assert_eq!(HarnessConfig::from_json_str(&json).expect("parse"), parsed);

    let err = HarnessConfig::from_json_str(r#"{"frame_budjet": 4}"#).expect_err("typo");
    assert!(matches!(err, ScenarioError::InvalidOptions(_)));
    assert_eq!(UPDATE_BASELINES_ENV, "CHART_SCENARIOS_UPDATE_BASELINES");
}

#[test]
fn scenario_data_helpers_match_fixture_inputs() {
    let series_one = whitespace::generate_data().expect("series one");
    assert_eq!(series_one.len(), 6);
    assert_eq!(series_one[0].value, Some(80.01));
    assert_eq!(series_one[5].value, Some(80.01));

    let gaps = whitespace::generate_whitespace_data().expect("whitespace");
    assert!(gaps.iter().all(|point| point.is_whitespace()));
    assert_eq!(
        gaps[0].time,
        Timestamp::business_day(whitespace::REPLACED_TIME).expect("day")
    );

    let lines = empty_price_scale_id::generate_line_data(10.0).expect("line data");
    assert_eq!(lines[0].value, Some(10.0));
    assert_eq!(lines.len(), empty_price_scale_id::POINT_COUNT);
}
