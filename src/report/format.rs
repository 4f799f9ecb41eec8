/// Fractional digits of solution values, optima and deviations.
pub const VALUE_PRECISION: usize = 2;

/// Fractional digits of elapsed times.
pub const TIME_PRECISION: usize = 6;

/// Renders `value` with exactly `precision` fractional digits; absent values become empty text.
pub fn format_fixed(value: Option<f64>, precision: usize) -> String {
    match value {
        None => String::new(),
        Some(v) if v.is_nan() => "nan".to_string(),
        Some(v) if v.is_infinite() => (if v > 0.0 { "inf" } else { "-inf" }).to_string(),
        Some(v) => format!("{v:.precision$}"),
    }
}

pub fn format_value(value: Option<f64>) -> String {
    format_fixed(value, VALUE_PRECISION)
}

pub fn format_time(value: Option<f64>) -> String {
    format_fixed(value, TIME_PRECISION)
}
