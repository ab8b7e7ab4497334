//! Built-in scenarios, one module per test case.
//!
//! Each module exposes its scenario type plus the data helpers it feeds to
//! the chart, so tests can assert on the exact inputs.

pub mod do_not_shift_range_when_replacing_whitespace;
pub mod empty_price_scale_id;
pub mod fix_left_edge;
pub mod logarithmic_scale_on_small_values;
pub mod price_line_style;
pub mod set_price_line_label;
pub mod single_visible_point_line_first_bar;

use crate::core::Timestamp;
use crate::error::ScenarioResult;

use super::Scenario;

pub use do_not_shift_range_when_replacing_whitespace::DoNotShiftRangeWhenReplacingWhitespace;
pub use empty_price_scale_id::EmptyPriceScaleId;
pub use fix_left_edge::FixLeftEdge;
pub use logarithmic_scale_on_small_values::LogarithmicScaleOnSmallValues;
pub use price_line_style::PriceLineStyle;
pub use set_price_line_label::SetPriceLineLabel;
pub use single_visible_point_line_first_bar::SingleVisiblePointLineFirstBar;

/// Every built-in scenario, in execution order.
#[must_use]
pub fn builtin_scenarios() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(FixLeftEdge),
        Box::new(PriceLineStyle),
        Box::new(SetPriceLineLabel),
        Box::new(LogarithmicScaleOnSmallValues),
        Box::new(SingleVisiblePointLineFirstBar),
        Box::new(DoNotShiftRangeWhenReplacingWhitespace),
        Box::new(EmptyPriceScaleId),
    ]
}

#[must_use]
pub fn find_scenario(id: &str) -> Option<Box<dyn Scenario>> {
    builtin_scenarios()
        .into_iter()
        .find(|scenario| scenario.id() == id)
}

/// UTC midnight of a `YYYY-MM-DD` day as epoch seconds.
pub(crate) fn utc_day(text: &str) -> ScenarioResult<Timestamp> {
    Ok(Timestamp::Unix(Timestamp::business_day(text)?.unix_seconds()))
}
