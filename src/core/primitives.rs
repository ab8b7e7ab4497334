use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::error::{ScenarioError, ScenarioResult};

pub const SECONDS_PER_DAY: i64 = 86_400;

#[must_use]
pub fn business_day_to_unix_seconds(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map_or(0, |midnight| midnight.and_utc().timestamp())
}

/// Returns `start + days` as a calendar date.
pub fn add_days(start: NaiveDate, days: usize) -> ScenarioResult<NaiveDate> {
    let days = u64::try_from(days)
        .map_err(|_| ScenarioError::InvalidData("day offset overflows u64".to_owned()))?;
    start.checked_add_days(Days::new(days)).ok_or_else(|| {
        ScenarioError::InvalidData(format!("date {start} + {days} day(s) is out of range"))
    })
}

pub fn f64_to_decimal(value: f64, field_name: &str) -> ScenarioResult<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| {
        ScenarioError::InvalidData(format!("{field_name} cannot be represented as decimal"))
    })
}

/// Formats a price with a fixed number of fractional digits.
pub fn format_price(value: f64, precision: u8) -> ScenarioResult<String> {
    let rounded = f64_to_decimal(value, "price")?.round_dp(u32::from(precision));
    Ok(format!("{rounded:.prec$}", prec = usize::from(precision)))
}
