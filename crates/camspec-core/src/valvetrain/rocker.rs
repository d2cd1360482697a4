//! Rocker ratio / valve lift conversion

use super::DEFAULT_ROCKER_RATIO;

fn usable_ratio(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0
}

/// Rescale a published valve lift from the ratio it was published at to the
/// rocker ratio actually installed.
///
/// If either ratio is non-positive or non-finite the lift is returned
/// unscaled.
pub fn adjust_lift(published_lift: f64, published_ratio: f64, actual_ratio: f64) -> f64 {
    if !usable_ratio(published_ratio) || !usable_ratio(actual_ratio) {
        return published_lift;
    }
    published_lift / published_ratio * actual_ratio
}

/// Parse a user-typed ratio, falling back when it is blank, unparseable or
/// not positive.
pub fn parse_ratio(input: &str, fallback: f64) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(ratio) if usable_ratio(ratio) => ratio,
        _ if usable_ratio(fallback) => fallback,
        _ => DEFAULT_ROCKER_RATIO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_to_installed_ratio() {
        let lift = adjust_lift(0.585, 1.6, 1.7);
        assert!((lift - 0.6215625).abs() < 1e-9);
    }

    #[test]
    fn invalid_ratio_leaves_lift_alone() {
        assert_eq!(adjust_lift(0.585, 0.0, 1.7), 0.585);
        assert_eq!(adjust_lift(0.585, 1.6, f64::NAN), 0.585);
        assert_eq!(adjust_lift(0.585, -1.5, -1.7), 0.585);
    }

    #[test]
    fn parse_ratio_falls_back() {
        assert_eq!(parse_ratio(" 1.72 ", 1.6), 1.72);
        assert_eq!(parse_ratio("", 1.5), 1.5);
        assert_eq!(parse_ratio("-2", 1.5), 1.5);
        assert_eq!(parse_ratio("abc", 0.0), DEFAULT_ROCKER_RATIO);
    }
}
