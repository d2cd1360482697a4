//! Naturally aspirated peak horsepower model
//!
//! A multiplicative model: `k * cfm * cylinders` scaled by manifold, cam
//! duration, lifter, dynamic CR, displacement per cylinder, lift and LSA
//! factors. Peak RPM comes from a separate additive estimate.

use serde::{Deserialize, Serialize};

use super::calibration::Calibration;
use crate::cam::{or_fallback, TappetType};

/// Inputs to [`estimate_na_peak`]. Out-of-domain values are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NaModelInputs {
    /// Manifold aggressiveness, 1-5 (rounded)
    pub manifold_stage: f64,
    /// Intake duration @ .050 (deg)
    pub intake_duration: f64,
    /// Intake valve lift (in)
    pub intake_lift: f64,
    pub lsa: f64,
    pub tappet: TappetType,
    pub dynamic_cr: f64,
    pub displacement_cid: f64,
    pub cylinders: f64,
    /// Peak intake port flow (cfm)
    pub port_cfm: f64,
}

/// Naturally aspirated estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NaEstimate {
    /// Peak HP rounded to 0.1
    pub base_hp: f64,
    /// RPM where the model places peak HP
    pub peak_rpm: f64,
}

impl NaModelInputs {
    /// Inputs with every field forced into the model's domain
    pub fn clamped(&self) -> Self {
        let stage = self.manifold_stage.round();
        Self {
            manifold_stage: or_fallback(stage, 1.0).clamp(1.0, 5.0),
            intake_duration: or_fallback(self.intake_duration, 0.0).max(150.0),
            intake_lift: or_fallback(self.intake_lift, 0.5).max(0.35),
            lsa: or_fallback(self.lsa, 110.0).clamp(104.0, 118.0),
            tappet: self.tappet,
            dynamic_cr: or_fallback(self.dynamic_cr, 0.0).clamp(5.0, 11.0),
            displacement_cid: or_fallback(self.displacement_cid, 0.0).max(1.0),
            cylinders: or_fallback(self.cylinders, 0.0).max(1.0),
            port_cfm: or_fallback(self.port_cfm, 0.0).max(1.0),
        }
    }
}

/// Estimate NA peak horsepower and the RPM it lands at.
pub fn estimate_na_peak(inputs: &NaModelInputs, cal: &Calibration) -> NaEstimate {
    let NaModelInputs {
        manifold_stage: stage,
        intake_duration: dur,
        intake_lift: lift,
        lsa,
        tappet,
        dynamic_cr: dcr,
        displacement_cid: cid,
        cylinders: cyl,
        port_cfm: cfm,
    } = inputs.clamped();
    let roller = tappet == TappetType::Roller;

    let manifold_mult = cal.manifold_multiplier(stage as u8);
    let cam_mult = (cal.duration_base + (dur - 200.0) * cal.duration_slope)
        .clamp(cal.duration_min, cal.duration_max);
    let tappet_mult = if roller { cal.roller_bonus } else { 1.0 };
    let dcr_mult =
        (1.0 + (dcr - 8.0) * cal.dynamic_cr_slope).clamp(cal.dynamic_cr_min, cal.dynamic_cr_max);
    let lift_mult = (1.0 + (lift - 0.5) * cal.lift_slope).clamp(cal.lift_min, cal.lift_max);
    let lsa_mult =
        (cal.lsa_peak - (lsa - 110.0).abs() * cal.lsa_slope).clamp(cal.lsa_floor, cal.lsa_peak);

    let cid_per_cyl = cid / cyl;
    let cid_mult = (cid_per_cyl / 50.0)
        .powf(cal.displacement_exponent)
        .clamp(cal.displacement_min, cal.displacement_max);

    let base_hp = cfm
        * cyl
        * cal.hp_per_cfm
        * manifold_mult
        * cam_mult
        * tappet_mult
        * dcr_mult
        * cid_mult
        * lift_mult
        * lsa_mult;

    let mut peak_rpm = 4300.0
        + (dur - 210.0) * 22.0
        + (stage - 1.0) * 180.0
        + if roller { 120.0 } else { 0.0 }
        + (lift - 0.5) * 200.0;
    peak_rpm *= (50.0 / cid_per_cyl).sqrt().clamp(0.78, 1.12);
    let peak_rpm = peak_rpm.clamp(2500.0, 8500.0);

    NaEstimate {
        base_hp: (base_hp * 10.0).round() / 10.0,
        peak_rpm: peak_rpm.round(),
    }
}
