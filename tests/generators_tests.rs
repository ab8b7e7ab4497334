use chart_scenarios::ScenarioError;
use chart_scenarios::core::{
    Color, DEFAULT_PALETTE, LinePoint, LinearValues, Timestamp, TimeStepping, colored_series,
    fixed_series, linear_series, ohlc_at, ohlc_series, sparse_series,
    validate_strictly_increasing,
};
use chrono::NaiveDate;

#[test]
fn twenty_daily_points_start_at_2018_epoch() {
    let points = linear_series(20, TimeStepping::daily_from_2018(), LinearValues::identity())
        .expect("linear series");

    assert_eq!(points.len(), 20);
    assert_eq!(points[0].time, Timestamp::Unix(1_514_764_800));
    assert_eq!(points[0].value, Some(0.0));
    assert_eq!(points[19].time, Timestamp::Unix(1_516_406_400));
    assert_eq!(points[19].value, Some(19.0));
}

#[test]
fn linear_values_apply_base_scale_and_offset() {
    let values = LinearValues {
        index_base: 1.0,
        scale: 2.0,
        offset: 10.0,
    };
    assert!((values.value_at(0) - 12.0).abs() <= 1e-12);
    assert!((values.value_at(4) - 20.0).abs() <= 1e-12);
    assert!((LinearValues::offset(100.0).value_at(3) - 103.0).abs() <= 1e-12);
    assert!((LinearValues::scaled(1e-9).value_at(7) - 7e-9).abs() <= 1e-21);
}

#[test]
fn sparse_series_keeps_values_only_on_period_boundaries() {
    for offset in [0.0, 100.0] {
        let points = sparse_series(500, TimeStepping::daily_from_2018(), 100, offset)
            .expect("sparse series");
        assert_eq!(points.len(), 500);

        let valued: Vec<(usize, f64)> = points
            .iter()
            .enumerate()
            .filter_map(|(index, point)| point.value.map(|value| (index, value)))
            .collect();
        assert_eq!(
            valued.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
            vec![0, 100, 200, 300, 400]
        );
        for (index, value) in valued {
            assert!((value - (index as f64 + offset)).abs() <= 1e-9);
        }
        assert!(points[0].value.is_some());
        assert!(points[1].is_whitespace());
    }
}

#[test]
fn sparse_series_rejects_zero_period() {
    let err = sparse_series(10, TimeStepping::daily_from_2018(), 0, 0.0)
        .expect_err("zero period must fail");
    assert!(matches!(err, ScenarioError::InvalidData(_)));
}

#[test]
fn colored_series_cycles_palette_including_no_override_slot() {
    let points = colored_series(7, TimeStepping::daily_from_2018(), 10.0, &DEFAULT_PALETTE)
        .expect("colored series");

    assert_eq!(points[0].color, Some(Color::rgb(0x01, 0x33, 0x70)));
    assert_eq!(points[1].color, Some(Color::rgb(0x3a, 0x96, 0x56)));
    assert_eq!(points[2].color, None);
    assert_eq!(points[3].color, points[0].color);
    assert_eq!(points[5].color, None);
    assert_eq!(points[6].value, Some(16.0));
}

#[test]
fn colored_series_rejects_empty_palette() {
    assert!(colored_series(3, TimeStepping::daily_from_2018(), 0.0, &[]).is_err());
}

#[test]
fn ohlc_generator_matches_perturbation_rule() {
    let (open, high, low, close) = ohlc_at(0);
    assert_eq!((open, high, low, close), (0.0, 0.0, 0.0, 0.0));

    // i = 7: base 1.4, step 0.0014, odd index so sign = +1.
    let (open, high, low, close) = ohlc_at(7);
    assert!((open - 1.4 * (1.0 - 0.0014)).abs() <= 1e-12);
    assert!((high - 1.4 * (1.0 + 4.0 * 0.0014)).abs() <= 1e-12);
    assert!((low - 1.4 * (1.0 - 4.0 * 0.0014)).abs() <= 1e-12);
    assert!((close - 1.4 * (1.0 + 0.0014)).abs() <= 1e-12);

    let bars = ohlc_series(500, TimeStepping::daily_from_2018()).expect("ohlc series");
    assert_eq!(bars.len(), 500);
    assert!(bars[7].is_bullish());
    assert!(!bars[8].is_bullish());
}

#[test]
fn business_day_stepping_emits_calendar_dates() {
    let start = NaiveDate::from_ymd_opt(2019, 4, 11).expect("date");
    let stepping = TimeStepping::BusinessDaysFrom(start);

    let time = stepping.time_at(6).expect("time");
    assert_eq!(time, Timestamp::business_day("2019-04-17").expect("business day"));
    assert_eq!(time.to_string(), "2019-04-17");
}

#[test]
fn timestamps_and_stepping_use_fixture_json_forms() {
    let point: LinePoint =
        serde_json::from_str(r#"{"time": "2019-04-17", "value": 84.43}"#).expect("business day");
    assert!(matches!(point.time, Timestamp::BusinessDay(_)));
    assert_eq!(point.time, Timestamp::Unix(1_555_459_200));

    let gap: LinePoint = serde_json::from_str(r#"{"time": 1514764800}"#).expect("unix time");
    assert_eq!(gap.time, Timestamp::Unix(1_514_764_800));
    assert!(gap.is_whitespace());

    let day = Timestamp::business_day("2018-01-20").expect("business day");
    assert_eq!(serde_json::to_value(day).expect("encode"), serde_json::json!("2018-01-20"));

    let stepping = TimeStepping::daily_from_2018();
    let encoded = serde_json::to_value(stepping).expect("encode stepping");
    assert_eq!(encoded, serde_json::json!({"daily_from": "2018-01-01"}));
    let decoded: TimeStepping = serde_json::from_value(encoded).expect("decode stepping");
    assert_eq!(decoded, stepping);
}

#[test]
fn index_stepping_counts_from_start() {
    let stepping = TimeStepping::Index { start: 10 };
    assert_eq!(stepping.time_at(0).expect("time"), Timestamp::Unix(10));
    assert_eq!(stepping.time_at(5).expect("time"), Timestamp::Unix(15));
}

#[test]
fn fixed_series_maps_missing_values_to_whitespace() {
    let points = fixed_series(&[
        (Timestamp::Unix(1), Some(1.5)),
        (Timestamp::Unix(2), None),
    ]);
    assert_eq!(points[0].value, Some(1.5));
    assert!(points[1].is_whitespace());
}

#[test]
fn ordering_validation_reports_first_non_increasing_timestamp() {
    let err = validate_strictly_increasing([1, 2, 2, 3].map(Timestamp::Unix))
        .expect_err("duplicate timestamp must fail");
    match err {
        ScenarioError::UnorderedData {
            index,
            previous,
            current,
        } => {
            assert_eq!(index, 2);
            assert_eq!(previous, 2);
            assert_eq!(current, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn business_days_and_unix_seconds_share_ordering() {
    let day = Timestamp::business_day("2018-01-01").expect("business day");
    assert_eq!(day, Timestamp::Unix(1_514_764_800));
    assert!(Timestamp::business_day("2017-12-31").expect("business day") < day);
    assert!(Timestamp::business_day("2018-13-01").is_err());
}
