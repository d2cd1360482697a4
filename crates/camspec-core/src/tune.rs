//! Tune configuration: intake, fuel, boost and the dyno sweep

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{normalize_key, ParseEnumError};
use crate::performance::FuelType;

/// Intake manifold category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeManifold {
    DualPlane,
    #[default]
    SinglePlane,
    TunnelRam,
    /// Plenum built for forced induction
    Boosted,
}

impl IntakeManifold {
    /// Manifold aggressiveness on the 1-5 stage scale of the HP model
    pub fn stage(&self) -> f64 {
        match self {
            IntakeManifold::DualPlane => 1.0,
            IntakeManifold::SinglePlane => 2.5,
            IntakeManifold::TunnelRam => 4.5,
            IntakeManifold::Boosted => 2.0,
        }
    }
}

impl fmt::Display for IntakeManifold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeManifold::DualPlane => f.write_str("dual_plane"),
            IntakeManifold::SinglePlane => f.write_str("single_plane"),
            IntakeManifold::TunnelRam => f.write_str("tunnel_ram"),
            IntakeManifold::Boosted => f.write_str("boosted"),
        }
    }
}

impl FromStr for IntakeManifold {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "dual_plane" | "dualplane" => Ok(IntakeManifold::DualPlane),
            "single_plane" | "singleplane" => Ok(IntakeManifold::SinglePlane),
            "tunnel_ram" | "tunnelram" => Ok(IntakeManifold::TunnelRam),
            "boosted" | "boost" | "plenum" => Ok(IntakeManifold::Boosted),
            _ => Err(ParseEnumError::new(
                "intake manifold",
                s,
                "dual_plane, single_plane, tunnel_ram, boosted",
            )),
        }
    }
}

/// Forced induction device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostDevice {
    #[default]
    Turbo,
    /// Belt-driven blower; pays a drivetrain loss proportional to boost
    Supercharger,
}

impl fmt::Display for BoostDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoostDevice::Turbo => f.write_str("turbo"),
            BoostDevice::Supercharger => f.write_str("supercharger"),
        }
    }
}

impl FromStr for BoostDevice {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "turbo" | "turbocharger" => Ok(BoostDevice::Turbo),
            "supercharger" | "blower" | "centrifugal" | "roots" | "screw" => {
                Ok(BoostDevice::Supercharger)
            }
            _ => Err(ParseEnumError::new("boost device", s, "turbo, supercharger")),
        }
    }
}

/// RPM sweep for the synthesized dyno curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpmSweep {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for RpmSweep {
    fn default() -> Self {
        Self {
            start: 2000.0,
            end: 7000.0,
            step: 250.0,
        }
    }
}

/// Highest rpm a sweep may reach
pub const MAX_SWEEP_RPM: f64 = 20_000.0;

/// Most samples a sweep may produce
pub const MAX_SWEEP_POINTS: usize = 1_000;

impl RpmSweep {
    /// Repair an unusable sweep: blank start → 2000, end not above start →
    /// start + 500, non-positive step → 250. The end is capped at
    /// [`MAX_SWEEP_RPM`] and the step widened so the sweep never exceeds
    /// [`MAX_SWEEP_POINTS`] samples.
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        let start = if self.start.is_finite() && self.start > 0.0 && self.start < MAX_SWEEP_RPM {
            self.start
        } else {
            defaults.start
        };
        let end = if self.end.is_finite() && self.end > start {
            self.end
        } else {
            start + 500.0
        };
        let end = end.min(MAX_SWEEP_RPM);
        let step = if self.step.is_finite() && self.step > 0.0 {
            self.step
        } else {
            defaults.step
        };
        let min_step = (end - start) / (MAX_SWEEP_POINTS - 1) as f64;
        Self {
            start,
            end,
            step: step.max(min_step),
        }
    }

    /// Number of samples, `floor((end - start) / step) + 1`
    pub fn point_count(&self) -> usize {
        let sweep = self.normalized();
        let intervals = ((sweep.end - sweep.start) / sweep.step).floor() as usize;
        intervals.min(MAX_SWEEP_POINTS - 1) + 1
    }

    /// RPM of each sample, computed by index to avoid step accumulation drift
    pub fn rpms(&self) -> impl Iterator<Item = f64> {
        let sweep = self.normalized();
        (0..self.point_count()).map(move |i| sweep.start + i as f64 * sweep.step)
    }
}

/// Intake, fuel, boost and sweep settings for one estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuneConfiguration {
    pub intake: IntakeManifold,
    pub fuel: FuelType,
    /// Boost pressure (psi gauge)
    pub boost_psi: f64,
    /// Target air/fuel ratio
    pub afr: f64,
    /// Intercooler effectiveness, 0-1
    pub intercooler_efficiency: f64,
    /// Compressor adiabatic efficiency, 0.4-0.85
    pub compressor_efficiency: f64,
    pub boost_device: BoostDevice,
    pub sweep: RpmSweep,
}

impl Default for TuneConfiguration {
    fn default() -> Self {
        Self {
            intake: IntakeManifold::SinglePlane,
            fuel: FuelType::Pump93,
            boost_psi: 0.0,
            afr: 12.0,
            intercooler_efficiency: 0.7,
            compressor_efficiency: 0.72,
            boost_device: BoostDevice::Turbo,
            sweep: RpmSweep::default(),
        }
    }
}

impl TuneConfiguration {
    /// Boost clamped to non-negative and finite
    pub fn boost_psi(&self) -> f64 {
        if self.boost_psi.is_finite() {
            self.boost_psi.max(0.0)
        } else {
            0.0
        }
    }

    /// Target AFR, or the fuel's best-power AFR when unset
    pub fn target_afr(&self) -> f64 {
        if self.afr.is_finite() && self.afr > 0.0 {
            self.afr
        } else {
            self.fuel.model().best_power_afr
        }
    }
}
