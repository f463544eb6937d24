//! Display formatting for computed statistics.

/// P-values below this are shown as `"< 0.001"`.
pub const P_VALUE_FLOOR: f64 = 0.001;

/// Fixed-decimal rendering with sentinels for non-finite values.
///
/// `inf` renders as `"∞"`, `-inf` as `"-∞"`, and NaN as `"N/A"`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "N/A".to_string()
    } else if value == f64::INFINITY {
        "∞".to_string()
    } else if value == f64::NEG_INFINITY {
        "-∞".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

pub fn format_p_value(p: f64) -> String {
    if p < P_VALUE_FLOOR {
        format!("< {P_VALUE_FLOOR}")
    } else {
        format_fixed(p, 4)
    }
}

/// `"= 0.5040"` or `"< 0.001"`, for use after a `p`.
pub fn p_phrase(p: f64) -> String {
    let text = format_p_value(p);
    if text.starts_with('<') {
        text
    } else {
        format!("= {text}")
    }
}

/// Percentages like 95.0 render as `"95"`, 99.9 as `"99.9"`.
pub fn format_percent(percent: f64) -> String {
    format!("{percent}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_and_sentinels() {
        assert_eq!(format_fixed(3.5, 4), "3.5000");
        assert_eq!(format_fixed(f64::INFINITY, 4), "∞");
        assert_eq!(format_fixed(f64::NEG_INFINITY, 2), "-∞");
        assert_eq!(format_fixed(f64::NAN, 4), "N/A");
    }

    #[test]
    fn p_value_floor() {
        assert_eq!(format_p_value(0.0004), "< 0.001");
        assert_eq!(format_p_value(0.001), "0.0010");
        assert_eq!(format_p_value(0.5040), "0.5040");
        assert_eq!(p_phrase(0.5040), "= 0.5040");
        assert_eq!(p_phrase(0.0001), "< 0.001");
    }

    #[test]
    fn percent_trims_trailing_zero() {
        assert_eq!(format_percent(95.0), "95");
        assert_eq!(format_percent(99.9), "99.9");
    }
}
