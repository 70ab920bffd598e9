//! Number formatting for axis ticks, category labels and legend percentages.

/// Format a number the way a dashboard label shows it: integers without a
/// fractional part, everything else with Rust's shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Format a y-axis tick value.
///
/// Ticks on a scale whose maximum is at least 10 are rounded to integers;
/// smaller scales keep one decimal so that ticks stay distinguishable.
pub fn format_axis_value(value: f64, max_value: f64) -> String {
    if max_value >= 10.0 {
        format!("{:.0}", value.round())
    } else {
        format!("{value:.1}")
    }
}

/// Format `part / total` as a percentage with one decimal (`"50.0%"`).
///
/// A non-positive total formats as `"0.0%"`.
pub fn format_percent(part: f64, total: f64) -> String {
    if total <= 0.0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part / total * 100.0)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(10.0, "10" ; "integer")]
    #[test_case(-3.0, "-3" ; "negative integer")]
    #[test_case(8.2, "8.2" ; "one decimal")]
    #[test_case(0.125, "0.125" ; "several decimals")]
    #[test_case(f64::NAN, "0" ; "nan")]
    fn test_format_number(value: f64, expected: &str) {
        assert_eq!(format_number(value), expected);
    }

    #[test_case(13.2, 66.0, "13" ; "large scale rounds")]
    #[test_case(26.4, 66.0, "26" ; "large scale rounds down")]
    #[test_case(0.44, 2.2, "0.4" ; "small scale keeps a decimal")]
    #[test_case(0.0, 0.0, "0.0" ; "degenerate scale")]
    fn test_format_axis_value(value: f64, max: f64, expected: &str) {
        assert_eq!(format_axis_value(value, max), expected);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(50.0, 100.0), "50.0%");
        assert_eq!(format_percent(1.0, 3.0), "33.3%");
        assert_eq!(format_percent(5.0, 0.0), "0.0%");
    }
}
