use chart_scenarios::core::{
    DEFAULT_PALETTE, LinearValues, TimeStepping, colored_series, linear_series, ohlc_series,
    sparse_series, validate_strictly_increasing,
};
use chart_scenarios::scenario::{ScenarioRunner, find_scenario};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_linear_series_10k(c: &mut Criterion) {
    c.bench_function("linear_series_10k", |b| {
        b.iter(|| {
            let points = linear_series(
                black_box(10_000),
                TimeStepping::daily_from_2018(),
                LinearValues::identity(),
            )
            .expect("linear series");
            black_box(points.len())
        })
    });
}

fn bench_sparse_and_colored_series(c: &mut Criterion) {
    c.bench_function("sparse_series_10k_period_100", |b| {
        b.iter(|| {
            sparse_series(
                black_box(10_000),
                TimeStepping::daily_from_2018(),
                100,
                0.0,
            )
            .expect("sparse series")
        })
    });

    c.bench_function("colored_series_10k", |b| {
        b.iter(|| {
            colored_series(
                black_box(10_000),
                TimeStepping::daily_from_2018(),
                10.0,
                &DEFAULT_PALETTE,
            )
            .expect("colored series")
        })
    });
}

fn bench_ohlc_series_with_validation(c: &mut Criterion) {
    c.bench_function("ohlc_series_10k_validated", |b| {
        b.iter(|| {
            let bars =
                ohlc_series(black_box(10_000), TimeStepping::daily_from_2018()).expect("ohlc");
            validate_strictly_increasing(bars.iter().map(|bar| bar.time)).expect("ordered");
        })
    });
}

fn bench_deferred_scenario_run(c: &mut Criterion) {
    let runner = ScenarioRunner::default();
    let scenario =
        find_scenario("do-not-shift-range-when-replacing-whitespace").expect("builtin scenario");

    c.bench_function("whitespace_replacement_scenario_run", |b| {
        b.iter(|| {
            let run = runner.run(scenario.as_ref()).expect("scenario run");
            black_box(run.frames.len())
        })
    });
}

criterion_group!(
    benches,
    bench_linear_series_10k,
    bench_sparse_and_colored_series,
    bench_ohlc_series_with_validation,
    bench_deferred_scenario_run
);
criterion_main!(benches);
