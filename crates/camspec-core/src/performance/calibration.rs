//! Empirical calibration table for the horsepower model
//!
//! These numbers are tuned by hand against dyno sheets, not derived from
//! physics. They live in one place so they can be re-tuned without touching
//! the structure of the model.

use serde::{Deserialize, Serialize};

/// Tunable constants of the NA, fuel and boost models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// HP per cfm per cylinder before corrections
    pub hp_per_cfm: f64,
    /// Manifold multiplier for stages 1 through 5
    pub manifold_stage_multipliers: [f64; 5],
    /// Multiplier applied for roller lifters
    pub roller_bonus: f64,

    /// Duration factor: `base + (dur - 200) * slope`, clamped
    pub duration_base: f64,
    pub duration_slope: f64,
    pub duration_min: f64,
    pub duration_max: f64,

    /// Dynamic CR factor: `1 + (dcr - 8) * slope`, clamped
    pub dynamic_cr_slope: f64,
    pub dynamic_cr_min: f64,
    pub dynamic_cr_max: f64,

    /// Lift factor: `1 + (lift - 0.5) * slope`, clamped
    pub lift_slope: f64,
    pub lift_min: f64,
    pub lift_max: f64,

    /// LSA factor: `peak - |lsa - 110| * slope`, clamped to `[floor, peak]`
    pub lsa_peak: f64,
    pub lsa_slope: f64,
    pub lsa_floor: f64,

    /// Displacement factor: `(cid_per_cyl / 50) ^ exponent`, clamped
    pub displacement_exponent: f64,
    pub displacement_min: f64,
    pub displacement_max: f64,

    /// Standard deviation of the AFR Gaussian (AFR units)
    pub afr_sigma: f64,
    /// Smallest AFR multiplier
    pub afr_floor: f64,

    /// Ambient pressure (psi absolute)
    pub atmosphere_psi: f64,
    /// Charge heat penalty per unit of pressure ratio above 1
    pub heat_penalty_rate: f64,
    pub heat_penalty_max: f64,
    /// Cooling credit per unit of intercooler effectiveness
    pub intercooler_credit: f64,
    /// Cooling credit per unit of compressor efficiency above `compressor_baseline`
    pub compressor_credit: f64,
    pub compressor_baseline: f64,
    /// Supercharger drive loss per psi
    pub supercharger_loss_per_psi: f64,
    pub supercharger_loss_max: f64,

    /// E85 multiplier at 0 psi
    pub e85_base_gain: f64,
    /// Extra E85 gain reached at `e85_full_gain_psi`
    pub e85_boost_gain: f64,
    pub e85_full_gain_psi: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            hp_per_cfm: 0.20,
            manifold_stage_multipliers: [0.92, 0.97, 1.00, 1.03, 1.06],
            roller_bonus: 1.015,

            duration_base: 0.85,
            duration_slope: 0.003,
            duration_min: 0.78,
            duration_max: 1.15,

            dynamic_cr_slope: 0.12,
            dynamic_cr_min: 0.75,
            dynamic_cr_max: 1.18,

            lift_slope: 0.15,
            lift_min: 0.85,
            lift_max: 1.18,

            lsa_peak: 1.03,
            lsa_slope: 0.015,
            lsa_floor: 0.98,

            displacement_exponent: 0.35,
            displacement_min: 0.75,
            displacement_max: 1.12,

            afr_sigma: 1.2,
            afr_floor: 0.965,

            atmosphere_psi: 14.7,
            heat_penalty_rate: 0.12,
            heat_penalty_max: 0.25,
            intercooler_credit: 0.65,
            compressor_credit: 0.5,
            compressor_baseline: 0.6,
            supercharger_loss_per_psi: 0.004,
            supercharger_loss_max: 0.10,

            e85_base_gain: 1.10,
            e85_boost_gain: 0.16,
            e85_full_gain_psi: 30.0,
        }
    }
}

impl Calibration {
    /// Manifold multiplier for a stage already rounded into 1..=5
    pub fn manifold_multiplier(&self, stage: u8) -> f64 {
        let index = usize::from(stage.clamp(1, 5)) - 1;
        self.manifold_stage_multipliers[index]
    }
}
