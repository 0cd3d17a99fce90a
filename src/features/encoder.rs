//! Feature Encoder - Reading + evaluation instant → FeatureVector
//!
//! Raw pass-through of the sensor values followed by three calendar features
//! taken from `now`. Weekdays count from Monday = 0, which is what the model
//! was trained with.

use chrono::{Datelike, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::vector::FeatureVector;
use crate::models::Reading;

/// Build the model input for `reading` as seen at `now`.
pub fn encode<T>(reading: &Reading, now: &T) -> FeatureVector
where
    T: Datelike + Timelike,
{
    FeatureVector::from_values([
        reading.air_quality as f64,
        decimal_to_f64(&reading.humidity),
        decimal_to_f64(&reading.temperature),
        now.hour() as f64,
        now.weekday().num_days_from_monday() as f64,
        now.month() as f64,
    ])
}

/// Nearest f64 to the decimal, via its text form so no scaling error creeps in.
///
/// `Decimal` always displays as `-?digits[.digits]` with magnitude below
/// 8e28, which `f64` parses to a finite value. `to_f64` covers the same
/// range arithmetically and is kept as the fallback, so no NaN is produced.
fn decimal_to_f64(value: &Decimal) -> f64 {
    value
        .to_string()
        .parse()
        .ok()
        .or_else(|| value.to_f64())
        .unwrap_or_default()
}
