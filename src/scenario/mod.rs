//! Scenario contract, orchestration and the built-in scenario corpus.
//!
//! A scenario builds a chart inside a fresh [`Container`], assigns its
//! initial data and optionally schedules frame-aligned mutations. Fully
//! synchronous scenarios return [`Completion::Immediate`]; scenarios that
//! must observe a rendered frame before mutating return a deferred future
//! that resolves after the last mutation has been rendered.

pub mod cases;
mod runner;

use std::fmt;
use std::future::Future;

use futures_util::future::LocalBoxFuture;

use crate::error::ScenarioResult;
use crate::frame::Container;

pub use cases::{builtin_scenarios, find_scenario};
pub use runner::{HarnessConfig, ScenarioRun, ScenarioRunner, UPDATE_BASELINES_ENV};

/// How the harness knows a scenario is ready to be captured.
pub enum Completion {
    /// Capture right after `run_test_case` returns.
    Immediate,
    /// Capture after the future resolves.
    Deferred(LocalBoxFuture<'static, ScenarioResult<()>>),
}

impl Completion {
    pub fn deferred(future: impl Future<Output = ScenarioResult<()>> + 'static) -> Self {
        Self::Deferred(Box::pin(future))
    }

    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => f.write_str("Immediate"),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// One visual test case.
pub trait Scenario {
    /// Stable identifier, also used as the baseline file stem.
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    /// Builds the chart in `container`, assigns data and schedules any
    /// post-load mutations.
    fn run_test_case(&self, container: &Container) -> ScenarioResult<Completion>;
}
