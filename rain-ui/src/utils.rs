use rust_decimal::Decimal;

/// Normalizes input for number parsing: trims whitespace and removes commas (thousands separator).
fn normalize_number_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a form value into a finite `f64`.
///
/// Handles comma as thousands separator (e.g. `"1,250.5"`). Returns `None`
/// for empty input, unparseable input and non-finite values such as `"inf"`.
pub fn parse_number(s: &str) -> Option<f64> {
    let normalized = normalize_number_input(s);
    if normalized.is_empty() {
        return None;
    }
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        Ok(value) => {
            tracing::debug!(input = %s, "non-finite number: {}", value);
            None
        }
        Err(e) => {
            tracing::debug!(input = %s, "invalid number: {}", e);
            None
        }
    }
}

/// Parses a string into an optional [`Decimal`].
///
/// Handles comma as thousands separator. Returns `None` for empty or whitespace-only input,
/// or when parsing fails (logs a warning on parse failure).
pub fn parse_optional_decimal(s: &str) -> Option<Decimal> {
    let normalized = normalize_number_input(s);
    if normalized.is_empty() {
        None
    } else {
        normalized.parse().map_or_else(
            |e| {
                tracing::warn!(input = %s, "invalid optional decimal: {}", e);
                None
            },
            Some,
        )
    }
}

/// Renders a stored number back into a form field.
///
/// Whole values drop the fraction so `100.0` repopulates as `"100"`.
pub fn number_to_field(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
