//! Common utility functions for harvest calculations.
//!
//! This module provides shared functionality used by the calculation engine
//! and the presentation layer, including rounding and whole-unit counting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly one decimal place using half-up rounding.
///
/// Values at exactly 0.05 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rain_core::calculations::common::round_one_decimal;
///
/// assert_eq!(round_one_decimal(dec!(20.44)), dec!(20.4));
/// assert_eq!(round_one_decimal(dec!(20.45)), dec!(20.5));
/// assert_eq!(round_one_decimal(dec!(6.666666)), dec!(6.7));
/// ```
pub fn round_one_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `true` when `value` is a finite number strictly greater than zero.
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Counts how many whole units of `divisor` liters fit in `volume_l`.
///
/// Never negative: a non-positive or non-finite volume or divisor yields 0.
///
/// # Examples
///
/// ```
/// use rain_core::calculations::common::whole_units;
///
/// assert_eq!(whole_units(76000.0, 1100.0), 69);
/// assert_eq!(whole_units(59.9, 60.0), 0);
/// assert_eq!(whole_units(100.0, 0.0), 0);
/// ```
pub fn whole_units(
    volume_l: f64,
    divisor: f64,
) -> u64 {
    if !is_positive(volume_l) || !is_positive(divisor) {
        return 0;
    }
    (volume_l / divisor).floor() as u64
}
