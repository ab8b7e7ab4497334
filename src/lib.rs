//! chart-scenarios: deterministic visual-test harness for a charting library.
//!
//! Synthetic series generators, a chart facade with closed option
//! structures, a headless reference backend, frame-aligned continuation
//! scheduling and a scenario runner that captures every frame as data.

pub mod api;
pub mod core;
pub mod error;
pub mod frame;
pub mod headless;
pub mod render;
pub mod scenario;
pub mod telemetry;

pub use api::{ChartHandle, ChartOptions, SeriesHandle, create_chart};
pub use error::{ScenarioError, ScenarioResult};
pub use frame::{Container, FrameSequencer};
pub use scenario::{Completion, HarnessConfig, Scenario, ScenarioRun, ScenarioRunner};
