use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Rounds `value` to `dp` decimal places on its decimal representation.
///
/// Values that cannot be represented as a `Decimal` (NaN, infinities, huge
/// magnitudes) are returned untouched.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(dp))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Money amounts are reported with two decimals.
pub fn money(value: f64) -> f64 {
    round_dp(value, 2)
}

/// Percentages are reported with one decimal.
pub fn percent(value: f64) -> f64 {
    round_dp(value, 1)
}
