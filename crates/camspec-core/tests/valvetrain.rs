//! Tests for rocker ratio conversion and head flow lookup

#[cfg(test)]
mod tests {
    use camspec_core::valvetrain::{adjust_lift, parse_ratio, FlowSample, HeadFlowCurve};

    fn bench_sheet() -> HeadFlowCurve {
        HeadFlowCurve::new(vec![
            FlowSample::new(0.500, Some(262.0), Some(190.0)),
            FlowSample::new(0.200, Some(142.0), Some(110.0)),
            FlowSample::new(0.300, Some(196.0), None),
            FlowSample::new(0.400, Some(234.0), Some(170.0)),
            FlowSample::new(0.600, Some(268.0), Some(201.0)),
        ])
    }

    #[test]
    fn test_rocker_conversion_round_trip() {
        let installed = adjust_lift(0.585, 1.6, 1.73);
        let back = adjust_lift(installed, 1.73, 1.6);
        assert!((back - 0.585).abs() < 1e-12);
        assert!(installed > 0.585);
    }

    #[test]
    fn test_same_ratio_is_identity() {
        assert_eq!(adjust_lift(0.574, 1.6, 1.6), 0.574);
    }

    #[test]
    fn test_invalid_ratio_leaves_lift_unscaled() {
        assert_eq!(adjust_lift(0.5, 0.0, 1.7), 0.5);
        assert_eq!(adjust_lift(0.5, 1.5, f64::NAN), 0.5);
    }

    #[test]
    fn test_parse_ratio_fallbacks() {
        assert_eq!(parse_ratio(" 1.7 ", 1.6), 1.7);
        assert_eq!(parse_ratio("", 1.5), 1.5);
        assert_eq!(parse_ratio("-1", 1.5), 1.5);
        assert_eq!(parse_ratio("abc", 0.0), 1.6);
    }

    #[test]
    fn test_samples_sorted_by_lift() {
        let curve = bench_sheet();
        let lifts: Vec<f64> = curve.samples().iter().map(|s| s.lift).collect();
        assert_eq!(lifts, vec![0.2, 0.3, 0.4, 0.5, 0.6]);
    }

    #[test]
    fn test_lookup_at_exact_sample() {
        let curve = bench_sheet();
        assert_eq!(curve.intake_at(0.4), Some(234.0));
        assert_eq!(curve.exhaust_at(0.5), Some(190.0));
    }

    #[test]
    fn test_lookup_interpolates_between_samples() {
        let curve = bench_sheet();
        let flow = curve.intake_at(0.45).unwrap();
        assert!((flow - 248.0).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_clamps_outside_range() {
        let curve = bench_sheet();
        assert_eq!(curve.intake_at(0.05), Some(142.0));
        assert_eq!(curve.intake_at(0.9), Some(268.0));
    }

    #[test]
    fn test_missing_exhaust_uses_intake() {
        let curve = bench_sheet();
        assert_eq!(curve.exhaust_at(0.3), Some(196.0));
    }

    #[test]
    fn test_empty_curve_has_no_flow() {
        let curve = HeadFlowCurve::new(vec![FlowSample::new(0.3, None, None)]);
        assert!(curve.is_empty());
        assert_eq!(curve.intake_at(0.5), None);
        assert_eq!(curve.peak_intake_flow(), None);
    }

    #[test]
    fn test_curve_from_json_list() {
        let json = r#"[
            { "lift": 0.6, "intake_cfm": 270 },
            { "lift": 0.2, "intake_cfm": 140, "exhaust_cfm": 105 }
        ]"#;
        let curve: HeadFlowCurve = serde_json::from_str(json).unwrap();
        assert_eq!(curve.len(), 2);
        assert_eq!(curve.peak_intake_flow(), Some(270.0));
        assert_eq!(curve.samples()[0].lift, 0.2);
    }
}
