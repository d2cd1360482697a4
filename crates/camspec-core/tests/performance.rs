//! Tests for the performance estimate pipeline

#[cfg(test)]
mod tests {
    use camspec_core::cam::{CamshaftSpec, TappetType};
    use camspec_core::geometry::EngineGeometry;
    use camspec_core::performance::{
        estimate_na_peak, recompute, recompute_with, synthesize_curve, Calibration,
        EstimateStatus, FuelType, NaModelInputs, PerformanceInputs,
    };
    use camspec_core::tune::{IntakeManifold, RpmSweep, TuneConfiguration, MAX_SWEEP_POINTS};
    use camspec_core::valvetrain::{FlowSample, HeadFlowCurve};

    fn reference_inputs() -> PerformanceInputs {
        PerformanceInputs {
            geometry: EngineGeometry {
                bore: 4.03,
                stroke: 3.5,
                rod_length: 5.956,
                cylinders: 8,
                chamber_cc: 56.0,
                piston_cc: 19.5,
                gasket_bore: 4.06,
                gasket_thickness: 0.04,
                deck_clearance: 0.015,
                port_cfm: 300.0,
            },
            cam: CamshaftSpec {
                intake_duration: 226.0,
                exhaust_duration: 234.0,
                lsa: 114.0,
                ivc: 43.0,
                intake_lift: 0.585,
                exhaust_lift: 0.574,
                ..CamshaftSpec::default()
            },
            tune: TuneConfiguration {
                intake: IntakeManifold::SinglePlane,
                fuel: FuelType::Pump93,
                boost_psi: 0.0,
                afr: 12.0,
                ..TuneConfiguration::default()
            },
            head_flow: None,
        }
    }

    fn na_inputs(lift: f64) -> NaModelInputs {
        NaModelInputs {
            manifold_stage: 2.5,
            intake_duration: 226.0,
            intake_lift: lift,
            lsa: 114.0,
            tappet: TappetType::Roller,
            dynamic_cr: 8.2,
            displacement_cid: 357.0,
            cylinders: 8.0,
            port_cfm: 300.0,
        }
    }

    #[test]
    fn test_reference_engine_end_to_end() {
        let report = recompute(&reference_inputs());

        assert!(report.is_complete());
        assert!(report.static_cr > report.dynamic_cr);
        assert!(report.dynamic_cr > 0.0);
        assert!(report.peak_hp.is_finite() && report.peak_hp > 0.0);
        assert_eq!(report.curve.len(), 21);
        assert_eq!(report.effective_cr, report.dynamic_cr);
    }

    #[test]
    fn test_curve_point_count_follows_sweep() {
        let mut inputs = reference_inputs();
        inputs.tune.sweep = RpmSweep {
            start: 1500.0,
            end: 6800.0,
            step: 500.0,
        };
        let report = recompute(&inputs);
        assert_eq!(report.curve.len(), 11);
        assert_eq!(report.curve[10].rpm, 6500.0);
    }

    #[test]
    fn test_runaway_sweep_is_bounded() {
        let mut inputs = reference_inputs();
        inputs.tune.sweep = RpmSweep {
            start: 2000.0,
            end: 1e300,
            step: 0.001,
        };
        let report = recompute(&inputs);
        assert!(!report.curve.is_empty());
        assert!(report.curve.len() <= MAX_SWEEP_POINTS);
        assert!(report.curve.iter().all(|p| p.rpm <= 20000.0 + 1e-6));
    }

    #[test]
    fn test_lift_increase_never_lowers_hp() {
        let cal = Calibration::default();
        let mut previous = estimate_na_peak(&na_inputs(0.50), &cal).base_hp;
        for step in 1..=10 {
            let lift = 0.50 + step as f64 * 0.01;
            let hp = estimate_na_peak(&na_inputs(lift), &cal).base_hp;
            assert!(hp >= previous, "lift {lift}: {hp} < {previous}");
            previous = hp;
        }
    }

    #[test]
    fn test_curve_peaks_at_peak_rpm() {
        let sweep = RpmSweep::default();
        let curve = synthesize_curve(450.0, 6000.0, &sweep, 8.1, 1.0);
        let at_peak = curve.iter().find(|p| p.rpm == 6000.0).unwrap();
        assert_eq!(at_peak.hp, 450.0);

        let after: Vec<f64> = curve
            .iter()
            .filter(|p| p.rpm >= 6000.0)
            .map(|p| p.hp)
            .collect();
        assert!(after.windows(2).all(|w| w[1] <= w[0]));
        assert!(curve.iter().all(|p| p.hp <= 450.0 && p.hp >= 0.0));
    }

    #[test]
    fn test_boost_raises_power_and_effective_cr() {
        let na = recompute(&reference_inputs());
        let mut inputs = reference_inputs();
        inputs.tune.boost_psi = 8.0;
        let boosted = recompute(&inputs);

        assert!(boosted.peak_hp > na.peak_hp);
        assert!(boosted.effective_cr > boosted.dynamic_cr);
        assert_eq!(boosted.na_hp, na.na_hp);
    }

    #[test]
    fn test_afr_off_best_power_costs_power() {
        let mut inputs = reference_inputs();
        inputs.tune.afr = 12.8;
        let best = recompute(&inputs);
        inputs.tune.afr = 14.7;
        let lean = recompute(&inputs);
        assert_eq!(best.corrections.afr, 1.0);
        assert!(lean.peak_hp < best.peak_hp);
    }

    #[test]
    fn test_head_flow_overrides_port_cfm() {
        let mut inputs = reference_inputs();
        inputs.head_flow = Some(HeadFlowCurve::new(vec![
            FlowSample::new(0.3, Some(200.0), None),
            FlowSample::new(0.7, Some(240.0), None),
        ]));
        let report = recompute(&inputs);
        assert!((report.port_cfm - 228.5).abs() < 1e-9);
        assert!(report.peak_hp < recompute(&reference_inputs()).peak_hp);
    }

    #[test]
    fn test_rocker_override_scales_reported_lift() {
        let mut inputs = reference_inputs();
        inputs.cam.rocker_ratio = Some(1.7);
        let report = recompute(&inputs);
        assert!((report.intake_lift - 0.585 / 1.6 * 1.7).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_geometry_is_insufficient_data() {
        let mut inputs = reference_inputs();
        inputs.geometry.chamber_cc = 0.0;
        inputs.geometry.piston_cc = -100.0;
        let report = recompute(&inputs);

        assert_eq!(report.status, EstimateStatus::InsufficientData);
        assert!(!report.issues.is_empty());
        assert_eq!(report.peak_hp, 0.0);
        assert_eq!(report.curve.len(), 21);
    }

    #[test]
    fn test_custom_calibration_scales_hp() {
        let base = recompute(&reference_inputs());
        let cal = Calibration {
            hp_per_cfm: 0.22,
            ..Calibration::default()
        };
        let scaled = recompute_with(&reference_inputs(), &cal);
        assert!(scaled.peak_hp > base.peak_hp);
    }

    #[test]
    fn test_metric_report() {
        let report = recompute(&reference_inputs());
        let metric = report.to_metric();
        assert!((metric.displacement_liters - report.displacement_cid / 61.0237441).abs() < 1e-9);
        assert!(metric.peak_kw < report.peak_hp);
        assert_eq!(metric.curve.len(), report.curve.len());
    }

    #[test]
    fn test_partial_json_inputs_keep_defaults() {
        let json = r#"{ "tune": { "boost_psi": 6 }, "cam": { "lsa": 112 } }"#;
        let inputs: PerformanceInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.tune.boost_psi, 6.0);
        assert_eq!(inputs.tune.afr, 12.0);
        assert_eq!(inputs.cam.lsa, 112.0);
        assert_eq!(inputs.cam.intake_duration, 226.0);
        assert_eq!(inputs.geometry, EngineGeometry::default());
    }
}
