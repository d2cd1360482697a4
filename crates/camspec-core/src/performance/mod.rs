//! Performance Estimation
//!
//! Runs the full pipeline for one set of inputs:
//! geometry → dynamic CR → NA model → fuel/AFR/boost corrections → curve.
//!
//! Every call is a complete recomputation over immutable inputs. Nothing is
//! cached between calls.

pub mod boost;
pub mod calibration;
pub mod curve;
pub mod fuel;
pub mod na_model;

pub use boost::{boost_correction, e85_boost_multiplier, pressure_ratio, BoostCorrection};
pub use calibration::Calibration;
pub use curve::{synthesize_curve, torque_from_hp, CurvePoint};
pub use fuel::{afr_multiplier, FuelModel, FuelType};
pub use na_model::{estimate_na_peak, NaEstimate, NaModelInputs};

use serde::{Deserialize, Serialize};

use crate::cam::CamshaftSpec;
use crate::geometry::{compute_geometry, dynamic_compression_ratio, EngineGeometry};
use crate::tune::TuneConfiguration;
use crate::unit_conversion::{cid_to_liters, hp_to_kw, lbft_to_nm};
use crate::valvetrain::{adjust_lift, HeadFlowCurve, DEFAULT_ROCKER_RATIO};

/// Everything one estimate needs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceInputs {
    pub geometry: EngineGeometry,
    pub cam: CamshaftSpec,
    pub tune: TuneConfiguration,
    /// Flow-bench curve for the heads; overrides `geometry.port_cfm` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_flow: Option<HeadFlowCurve>,
}

/// Whether a report carries real numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    #[default]
    Complete,
    /// Geometry could not produce a compression ratio or displacement; the
    /// power figures are zero placeholders.
    InsufficientData,
}

/// Multipliers applied on top of the NA estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionBreakdown {
    pub afr: f64,
    /// Flat fuel multiplier (1.0 for E85)
    pub fuel: f64,
    /// E85 boost curve (1.0 for other fuels)
    pub e85: f64,
    pub boost: BoostCorrection,
}

impl CorrectionBreakdown {
    /// Product of every correction
    pub fn total(&self) -> f64 {
        self.boost.multiplier * self.afr * self.fuel * self.e85
    }
}

/// Result of [`recompute`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub status: EstimateStatus,
    /// Why the status is not `Complete`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
    pub static_cr: f64,
    pub dynamic_cr: f64,
    /// Dynamic CR scaled by the boost pressure ratio
    pub effective_cr: f64,
    pub displacement_cid: f64,
    pub peak_hp: f64,
    pub peak_hp_rpm: f64,
    /// Torque at the peak HP rpm (lb-ft)
    pub peak_torque: f64,
    /// Naturally aspirated estimate before corrections
    pub na_hp: f64,
    /// Where the NA model itself would put peak power
    pub model_peak_rpm: f64,
    /// Intake lift after rocker ratio adjustment
    pub intake_lift: f64,
    /// Exhaust lift after rocker ratio adjustment
    pub exhaust_lift: f64,
    /// Port flow fed to the NA model
    pub port_cfm: f64,
    pub corrections: CorrectionBreakdown,
    pub curve: Vec<CurvePoint>,
}

/// Metric presentation of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub displacement_liters: f64,
    pub peak_kw: f64,
    pub peak_hp_rpm: f64,
    pub peak_torque_nm: f64,
    pub curve: Vec<MetricCurvePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricCurvePoint {
    pub rpm: f64,
    pub kw: f64,
    pub torque_nm: f64,
}

impl PerformanceReport {
    pub fn is_complete(&self) -> bool {
        self.status == EstimateStatus::Complete
    }

    pub fn to_metric(&self) -> MetricReport {
        MetricReport {
            displacement_liters: cid_to_liters(self.displacement_cid),
            peak_kw: hp_to_kw(self.peak_hp),
            peak_hp_rpm: self.peak_hp_rpm,
            peak_torque_nm: lbft_to_nm(self.peak_torque),
            curve: self
                .curve
                .iter()
                .map(|p| MetricCurvePoint {
                    rpm: p.rpm,
                    kw: hp_to_kw(p.hp),
                    torque_nm: lbft_to_nm(p.torque),
                })
                .collect(),
        }
    }
}

/// Run the estimate with the default calibration.
pub fn recompute(inputs: &PerformanceInputs) -> PerformanceReport {
    recompute_with(inputs, &Calibration::default())
}

/// Run the estimate with a custom calibration table.
pub fn recompute_with(inputs: &PerformanceInputs, cal: &Calibration) -> PerformanceReport {
    let geometry = &inputs.geometry;
    let cam = inputs.cam.normalized();
    let tune = &inputs.tune;

    let volumes = compute_geometry(geometry);
    let dynamic_cr = dynamic_compression_ratio(geometry, &volumes, cam.ivc);

    let published_ratio = cam.published_rocker_ratio.unwrap_or(DEFAULT_ROCKER_RATIO);
    let actual_ratio = cam.rocker_ratio.unwrap_or(published_ratio);
    let intake_lift = adjust_lift(cam.intake_lift, published_ratio, actual_ratio);
    let exhaust_lift = adjust_lift(cam.exhaust_lift, published_ratio, actual_ratio);

    let port_cfm = inputs
        .head_flow
        .as_ref()
        .and_then(|curve| curve.intake_at(intake_lift))
        .unwrap_or(geometry.port_cfm);

    let boost = boost_correction(tune, cal);
    let fuel = tune.fuel.model();
    let corrections = CorrectionBreakdown {
        afr: afr_multiplier(tune.target_afr(), fuel.best_power_afr, cal),
        fuel: if tune.fuel.is_e85() {
            1.0
        } else {
            fuel.power_multiplier
        },
        e85: e85_boost_multiplier(tune.fuel, boost.boost_psi, cal),
        boost,
    };

    let mut issues = Vec::new();
    if volumes.static_cr().is_none() {
        issues.push(format!(
            "clearance volume {:.3} in³ is not positive",
            volumes.clearance_volume
        ));
    }
    if volumes.is_defined() && volumes.displacement_cid().is_none() {
        issues.push("bore, stroke or cylinder count gives no displacement".to_string());
    }
    let status = if issues.is_empty() {
        EstimateStatus::Complete
    } else {
        EstimateStatus::InsufficientData
    };

    let na = estimate_na_peak(
        &NaModelInputs {
            manifold_stage: tune.intake.stage(),
            intake_duration: cam.intake_duration,
            intake_lift,
            lsa: cam.lsa,
            tappet: cam.tappet,
            dynamic_cr,
            displacement_cid: volumes.displacement_cid,
            cylinders: f64::from(geometry.cylinders),
            port_cfm,
        },
        cal,
    );

    let (na_hp, peak_hp) = match status {
        EstimateStatus::Complete => (na.base_hp, na.base_hp * corrections.total()),
        EstimateStatus::InsufficientData => (0.0, 0.0),
    };
    let peak_hp_rpm = cam.rpm_end.max(2500.0).round();
    let peak_torque = torque_from_hp(peak_hp, peak_hp_rpm);

    let curve = synthesize_curve(
        peak_hp,
        peak_hp_rpm,
        &tune.sweep,
        dynamic_cr,
        boost.pressure_ratio,
    );

    tracing::debug!(
        "Recomputed '{}': CR {:.2}/{:.2}, {:.1} hp @ {} rpm ({} points)",
        cam.name,
        volumes.static_cr,
        dynamic_cr,
        peak_hp,
        peak_hp_rpm,
        curve.len()
    );

    PerformanceReport {
        status,
        issues,
        static_cr: volumes.static_cr,
        dynamic_cr,
        effective_cr: dynamic_cr * boost.pressure_ratio,
        displacement_cid: volumes.displacement_cid,
        peak_hp,
        peak_hp_rpm,
        peak_torque,
        na_hp,
        model_peak_rpm: na.peak_rpm,
        intake_lift,
        exhaust_lift,
        port_cfm,
        corrections,
        curve,
    }
}
