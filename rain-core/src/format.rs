//! Number formatting for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rendered in place of a number that cannot be displayed.
pub const PLACEHOLDER: &str = "-";

/// Formats `value` with exactly `digits` decimals and `,` thousands grouping.
///
/// Non-finite input renders as [`PLACEHOLDER`].
///
/// ```
/// use rain_core::format::format_number;
///
/// assert_eq!(format_number(76000.0, 0), "76,000");
/// assert_eq!(format_number(76.0, 3), "76.000");
/// assert_eq!(format_number(f64::NAN, 2), "-");
/// ```
pub fn format_number(
    value: f64,
    digits: usize,
) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    group_thousands(&format!("{value:.digits$}"))
}

/// Formats a decimal amount with exactly `digits` decimals and `,` grouping.
pub fn format_decimal(
    value: Decimal,
    digits: u32,
) -> String {
    let rounded = value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    let width = digits as usize;
    group_thousands(&format!("{rounded:.width$}"))
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1,000");
    }

    #[test]
    fn format_number_pads_decimals() {
        assert_eq!(format_number(20.5, 2), "20.50");
        assert_eq!(format_number(0.0, 3), "0.000");
    }

    #[test]
    fn format_number_handles_negative_values() {
        assert_eq!(format_number(-12345.5, 1), "-12,345.5");
    }

    #[test]
    fn format_number_returns_placeholder_for_non_finite() {
        assert_eq!(format_number(f64::INFINITY, 0), PLACEHOLDER);
        assert_eq!(format_number(f64::NEG_INFINITY, 0), PLACEHOLDER);
        assert_eq!(format_number(f64::NAN, 0), PLACEHOLDER);
    }

    #[test]
    fn format_decimal_rounds_and_pads() {
        assert_eq!(format_decimal(dec!(6000), 2), "6,000.00");
        assert_eq!(format_decimal(dec!(20), 1), "20.0");
        assert_eq!(format_decimal(dec!(33.35), 1), "33.4");
    }
}
