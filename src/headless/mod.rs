//! Reference chart backend used when no external engine is plugged in.

mod chart;
mod time_scale;

pub use chart::HeadlessChart;
pub use time_scale::{LogicalRange, StrictRange, TimePointIndex, TimeScale};
