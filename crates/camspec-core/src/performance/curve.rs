//! Dyno curve synthesis from a single peak
//!
//! Power rises on a `t^1.6` ramp from 20% at the sweep start to 100% at the
//! peak, then falls on a `t^1.4` ramp over at least 800 rpm, never below 5%.

use serde::{Deserialize, Serialize};

use crate::tune::RpmSweep;

/// Constant relating horsepower, torque (lb-ft) and rpm
pub const HP_TORQUE_CROSSOVER_RPM: f64 = 5252.0;

/// One sample of the synthesized dyno curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub rpm: f64,
    pub hp: f64,
    /// lb-ft
    pub torque: f64,
    pub dynamic_cr: f64,
    /// Dynamic CR scaled by the boost pressure ratio
    pub effective_cr: f64,
}

/// Torque (lb-ft) at `rpm` for `hp`; zero at non-positive rpm
pub fn torque_from_hp(hp: f64, rpm: f64) -> f64 {
    if rpm > 0.0 {
        hp * HP_TORQUE_CROSSOVER_RPM / rpm
    } else {
        0.0
    }
}

/// Fraction of peak power at `rpm`.
pub fn shape_factor(rpm: f64, start: f64, peak_rpm: f64, end: f64) -> f64 {
    if rpm <= peak_rpm {
        let up_span = peak_rpm - start;
        let t = if up_span > 0.0 {
            ((rpm - start) / up_span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        0.2 + 0.8 * t.powf(1.6)
    } else {
        let down_span = (end - peak_rpm).max(800.0);
        let t = ((rpm - peak_rpm) / down_span).clamp(0.0, 1.0);
        (1.0 - 0.95 * t.powf(1.4)).max(0.05)
    }
}

/// Expand a peak HP at `peak_rpm` into a full curve over `sweep`.
///
/// The sweep is normalized first; the point count is always
/// `floor((end - start) / step) + 1`.
pub fn synthesize_curve(
    peak_hp: f64,
    peak_rpm: f64,
    sweep: &RpmSweep,
    dynamic_cr: f64,
    pressure_ratio: f64,
) -> Vec<CurvePoint> {
    let bounds = sweep.normalized();
    let effective_cr = dynamic_cr * pressure_ratio;
    let usable = peak_hp.is_finite() && peak_hp > 0.0;

    sweep
        .rpms()
        .map(|rpm| {
            let hp = if usable && rpm > 0.0 {
                peak_hp * shape_factor(rpm, bounds.start, peak_rpm, bounds.end)
            } else {
                0.0
            };
            CurvePoint {
                rpm,
                hp,
                torque: torque_from_hp(hp, rpm),
                dynamic_cr,
                effective_cr,
            }
        })
        .collect()
}
