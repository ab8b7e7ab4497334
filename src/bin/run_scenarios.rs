use std::path::PathBuf;

use chart_scenarios::render::BaselineOutcome;
use chart_scenarios::scenario::{HarnessConfig, ScenarioRunner, builtin_scenarios};
use chart_scenarios::telemetry;

#[derive(Debug)]
struct CliArgs {
    list: bool,
    only_scenario_id: Option<String>,
    baseline_dir: Option<PathBuf>,
    update: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let _ = telemetry::init_tracing_with_default("warn");

    let scenarios = builtin_scenarios();
    if args.list {
        for scenario in &scenarios {
            println!("{:<48} {}", scenario.id(), scenario.description());
        }
        return Ok(());
    }

    if let Some(id) = &args.only_scenario_id
        && !scenarios.iter().any(|scenario| scenario.id() == id)
    {
        return Err(format!("unknown scenario `{id}`"));
    }

    let mut config = HarnessConfig::from_env();
    if let Some(baseline_dir) = args.baseline_dir {
        config.baseline_dir = baseline_dir;
    }
    config.update_baselines |= args.update;
    let runner = ScenarioRunner::new(config);

    let mut failures = Vec::new();
    let mut checked = 0usize;
    for scenario in &scenarios {
        if args
            .only_scenario_id
            .as_ref()
            .is_some_and(|id| id != scenario.id())
        {
            continue;
        }
        checked += 1;

        match runner.run_and_compare(scenario.as_ref()) {
            Ok((run, outcome)) => {
                let label = match outcome {
                    BaselineOutcome::Matched => "ok",
                    BaselineOutcome::Created => "created",
                    BaselineOutcome::Updated => "updated",
                };
                println!("{label:<8} {} ({} frame(s))", run.id, run.frames.len());
            }
            Err(err) => {
                println!("{:<8} {}: {err}", "FAILED", scenario.id());
                failures.push(scenario.id());
            }
        }
    }

    println!(
        "done: {checked} scenario(s), {} failure(s)",
        failures.len()
    );
    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("failing scenario(s): {}", failures.join(", ")))
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut list = false;
    let mut only_scenario_id: Option<String> = None;
    let mut baseline_dir: Option<PathBuf> = None;
    let mut update = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--list" => list = true,
            "--update" => update = true,
            "--only" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --only".to_owned())?;
                only_scenario_id = Some(value);
            }
            "--baseline-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --baseline-dir".to_owned())?;
                baseline_dir = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        list,
        only_scenario_id,
        baseline_dir,
        update,
    })
}

fn print_usage() {
    println!("{}", usage_message());
}

fn usage_message() -> String {
    let default_dir = HarnessConfig::default().baseline_dir;
    format!(
        "Usage: cargo run --bin run_scenarios -- [options]\n\nOptions:\n  --list                 List built-in scenarios and exit\n  --only <scenario-id>   Run a single scenario by id\n  --baseline-dir <path>  Baseline directory (default: {})\n  --update               Rewrite baselines instead of comparing\n  -h, --help             Show this message",
        default_dir.display()
    )
}
