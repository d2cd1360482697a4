//! Boost corrections: pressure ratio gain, charge heat, blower drive loss
//! and the E85 boost curve

use serde::{Deserialize, Serialize};

use super::calibration::Calibration;
use super::fuel::FuelType;
use crate::cam::or_fallback;
use crate::tune::{BoostDevice, TuneConfiguration};

/// Breakdown of the boost correction for one tune
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostCorrection {
    /// Gauge boost actually used (psi, non-negative)
    pub boost_psi: f64,
    /// Absolute manifold pressure over ambient
    pub pressure_ratio: f64,
    /// Fraction of the pressure-ratio gain lost to charge heat
    pub heat_penalty: f64,
    /// Fraction lost driving a supercharger
    pub drive_loss: f64,
    /// Net multiplier, never below 1
    pub multiplier: f64,
}

/// Pressure ratio for a gauge boost
pub fn pressure_ratio(boost_psi: f64, cal: &Calibration) -> f64 {
    let psi = if boost_psi.is_finite() { boost_psi.max(0.0) } else { 0.0 };
    (cal.atmosphere_psi + psi) / cal.atmosphere_psi
}

/// Boost multiplier for a tune. Naturally aspirated tunes come out at 1.0.
pub fn boost_correction(tune: &TuneConfiguration, cal: &Calibration) -> BoostCorrection {
    let psi = tune.boost_psi();
    let pr = pressure_ratio(psi, cal);

    let intercooler = if tune.intercooler_efficiency.is_finite() {
        tune.intercooler_efficiency.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let compressor = or_fallback(tune.compressor_efficiency, 0.72).clamp(0.4, 0.85);

    let raw_heat = (pr - 1.0) * cal.heat_penalty_rate * tune.fuel.model().heat_sensitivity;
    let cooling_credit = intercooler * cal.intercooler_credit
        + (compressor - cal.compressor_baseline) * cal.compressor_credit;
    let heat_penalty = (raw_heat * (1.0 - cooling_credit)).clamp(0.0, cal.heat_penalty_max);

    let drive_loss = match tune.boost_device {
        BoostDevice::Supercharger => {
            (psi * cal.supercharger_loss_per_psi).clamp(0.0, cal.supercharger_loss_max)
        }
        BoostDevice::Turbo => 0.0,
    };

    let multiplier = (pr * (1.0 - heat_penalty) * (1.0 - drive_loss)).max(1.0);

    BoostCorrection {
        boost_psi: psi,
        pressure_ratio: pr,
        heat_penalty,
        drive_loss,
        multiplier,
    }
}

/// E85 gain, rising linearly with boost. Replaces the flat fuel multiplier.
/// Other fuels return 1.0.
pub fn e85_boost_multiplier(fuel: FuelType, boost_psi: f64, cal: &Calibration) -> f64 {
    if !fuel.is_e85() {
        return 1.0;
    }
    let psi = if boost_psi.is_finite() { boost_psi.max(0.0) } else { 0.0 };
    cal.e85_base_gain + (psi / cal.e85_full_gain_psi).clamp(0.0, 1.0) * cal.e85_boost_gain
}
