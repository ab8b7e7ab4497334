use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use futures_util::task::{ArcWake, waker};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use crate::core::Viewport;
use crate::error::{ScenarioError, ScenarioResult};
use crate::frame::Container;
use crate::render::{BaselineOutcome, FrameCapture, compare_with_baseline};

use super::{Completion, Scenario};

/// Setting this variable to `1` rewrites baselines instead of comparing them.
pub const UPDATE_BASELINES_ENV: &str = "CHART_SCENARIOS_UPDATE_BASELINES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub viewport: Viewport,
    /// Frames a scenario may consume before it is reported as hung.
    pub frame_budget: u32,
    pub baseline_dir: PathBuf,
    pub update_baselines: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            frame_budget: 16,
            baseline_dir: PathBuf::from("tests/fixtures/scenario_baselines"),
            update_baselines: false,
        }
    }
}

impl HarnessConfig {
    /// Defaults plus [`UPDATE_BASELINES_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        let update_baselines = std::env::var(UPDATE_BASELINES_ENV).is_ok_and(|value| value == "1");
        Self {
            update_baselines,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_frame_budget(mut self, frame_budget: u32) -> Self {
        self.frame_budget = frame_budget;
        self
    }

    #[must_use]
    pub fn with_baseline_dir(mut self, baseline_dir: impl Into<PathBuf>) -> Self {
        self.baseline_dir = baseline_dir.into();
        self
    }

    pub fn to_json_pretty(&self) -> ScenarioResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ScenarioError::InvalidOptions(format!("failed to serialize harness config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ScenarioResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ScenarioError::InvalidOptions(format!("failed to parse harness config: {e}"))
        })
    }

    #[must_use]
    pub fn baseline_path(&self, scenario_id: &str) -> PathBuf {
        self.baseline_dir.join(format!("{scenario_id}.json"))
    }
}

/// Result of driving one scenario to completion.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub id: String,
    pub deferred: bool,
    /// Every produced frame, final capture included.
    pub frames: Vec<FrameCapture>,
    pub final_capture: FrameCapture,
}

impl ScenarioRun {
    /// Capture of the 1-based frame `index`.
    #[must_use]
    pub fn frame(&self, index: u64) -> Option<&FrameCapture> {
        self.frames.iter().find(|capture| capture.frame == index)
    }
}

#[derive(Default)]
struct WakeFlag(AtomicBool);

impl WakeFlag {
    fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

impl ArcWake for WakeFlag {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.0.store(true, Ordering::SeqCst);
    }
}

/// Advances a container one frame at a time within a fixed budget.
struct FrameDriver<'a> {
    scenario: &'a str,
    container: &'a Container,
    budget: u32,
    ticks: u32,
    frames: Vec<FrameCapture>,
}

impl FrameDriver<'_> {
    fn advance(&mut self) -> ScenarioResult<Option<FrameCapture>> {
        if self.ticks >= self.budget {
            warn!(scenario = self.scenario, frames = self.budget, "frame budget exhausted");
            return Err(ScenarioError::FrameBudgetExhausted {
                scenario: self.scenario.to_owned(),
                frames: self.budget,
            });
        }
        self.ticks += 1;
        let capture = self.container.tick()?;
        if let Some(capture) = &capture {
            self.frames.push(capture.clone());
        }
        Ok(capture)
    }
}

/// Runs scenarios against fresh containers.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: HarnessConfig,
}

impl ScenarioRunner {
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn run(&self, scenario: &dyn Scenario) -> ScenarioResult<ScenarioRun> {
        self.run_in(scenario, &Container::new(self.config.viewport))
    }

    /// Runs `scenario` against a caller-provided container.
    pub fn run_in(
        &self,
        scenario: &dyn Scenario,
        container: &Container,
    ) -> ScenarioResult<ScenarioRun> {
        let span = info_span!("scenario", id = scenario.id());
        let _entered = span.enter();

        let completion = scenario.run_test_case(container)?;
        let deferred = completion.is_deferred();
        let mut driver = FrameDriver {
            scenario: scenario.id(),
            container,
            budget: self.config.frame_budget,
            ticks: 0,
            frames: Vec::new(),
        };

        if let Completion::Deferred(mut future) = completion {
            let flag = Arc::new(WakeFlag::default());
            let waker = waker(Arc::clone(&flag));
            let mut cx = Context::from_waker(&waker);
            let mut should_poll = true;
            loop {
                if should_poll && let Poll::Ready(result) = future.as_mut().poll(&mut cx) {
                    result?;
                    break;
                }
                driver.advance()?;
                should_poll = flag.take();
            }
            debug!(frames = driver.frames.len(), "deferred completion resolved");
        }

        let final_capture = loop {
            if let Some(capture) = driver.advance()? {
                break capture;
            }
        };
        info!(
            frames = driver.frames.len(),
            frame = final_capture.frame,
            "scenario captured"
        );
        Ok(ScenarioRun {
            id: scenario.id().to_owned(),
            deferred,
            frames: driver.frames,
            final_capture,
        })
    }

    /// Runs `scenario` and checks its final capture against the baseline file.
    pub fn run_and_compare(
        &self,
        scenario: &dyn Scenario,
    ) -> ScenarioResult<(ScenarioRun, BaselineOutcome)> {
        let run = self.run(scenario)?;
        let outcome = self.compare(&run)?;
        Ok((run, outcome))
    }

    pub fn compare(&self, run: &ScenarioRun) -> ScenarioResult<BaselineOutcome> {
        let path = self.config.baseline_path(&run.id);
        compare_with_baseline(&run.final_capture, &path, self.config.update_baselines)
    }
}
