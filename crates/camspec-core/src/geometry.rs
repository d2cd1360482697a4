//! Engine Geometry
//!
//! Computes swept volume, clearance volume, static compression ratio and
//! displacement from bore/stroke/chamber/gasket/deck measurements, and the
//! dynamic compression ratio trapped at intake valve closing.
//!
//! All lengths are inches, chamber and piston volumes are cc. Metric
//! geometry has to go through [`EngineGeometry::from_metric`] first.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{normalize_key, ParseEnumError};
use crate::unit_conversion::{cc_to_cubic_inches, inches_to_mm, mm_to_inches};

/// Physical engine measurements for one cylinder bank layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineGeometry {
    /// Cylinder bore (in)
    pub bore: f64,
    /// Crank stroke (in)
    pub stroke: f64,
    /// Connecting rod center-to-center length (in)
    pub rod_length: f64,
    pub cylinders: u32,
    /// Combustion chamber volume (cc)
    pub chamber_cc: f64,
    /// Piston dome (positive) or dish (negative) volume (cc)
    pub piston_cc: f64,
    /// Head gasket bore (in)
    pub gasket_bore: f64,
    /// Head gasket compressed thickness (in)
    pub gasket_thickness: f64,
    /// Piston-to-deck clearance (in); negative when the piston sits above deck
    pub deck_clearance: f64,
    /// Intake port flow per cylinder (cfm @ 28")
    pub port_cfm: f64,
}

impl Default for EngineGeometry {
    fn default() -> Self {
        Self {
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
        }
    }
}

impl EngineGeometry {
    /// Build geometry whose linear measurements were entered in millimeters.
    ///
    /// Bore, stroke, rod, gasket bore, gasket thickness and deck are
    /// converted to inches. Volumes (cc) and port flow are unit-independent.
    pub fn from_metric(metric: &EngineGeometry) -> Self {
        Self {
            bore: mm_to_inches(metric.bore),
            stroke: mm_to_inches(metric.stroke),
            rod_length: mm_to_inches(metric.rod_length),
            gasket_bore: mm_to_inches(metric.gasket_bore),
            gasket_thickness: mm_to_inches(metric.gasket_thickness),
            deck_clearance: mm_to_inches(metric.deck_clearance),
            ..metric.clone()
        }
    }

    /// Inverse of [`EngineGeometry::from_metric`]
    pub fn to_metric(&self) -> Self {
        Self {
            bore: inches_to_mm(self.bore),
            stroke: inches_to_mm(self.stroke),
            rod_length: inches_to_mm(self.rod_length),
            gasket_bore: inches_to_mm(self.gasket_bore),
            gasket_thickness: inches_to_mm(self.gasket_thickness),
            deck_clearance: inches_to_mm(self.deck_clearance),
            ..self.clone()
        }
    }

    /// Geometry for a known engine family. Port flow keeps the default.
    pub fn preset(preset: EnginePreset) -> Self {
        let (bore, stroke, rod, chamber, piston, gasket_bore, gasket_thk, deck) = match preset {
            EnginePreset::FordWindsor => (4.0, 3.0, 5.09, 58.0, 10.0, 4.08, 0.04, 0.012),
            EnginePreset::FordCleveland => (4.0, 3.5, 5.78, 64.0, 14.0, 4.1, 0.042, 0.015),
            EnginePreset::ChevySmallBlock => (4.0, 3.48, 5.7, 64.0, 12.0, 4.1, 0.041, 0.02),
            EnginePreset::ChevyBigBlock => (4.25, 4.0, 6.135, 110.0, -18.0, 4.37, 0.045, 0.0),
            EnginePreset::MoparLa => (4.0, 3.58, 6.123, 64.0, 8.0, 4.06, 0.04, 0.02),
        };
        Self {
            bore,
            stroke,
            rod_length: rod,
            cylinders: 8,
            chamber_cc: chamber,
            piston_cc: piston,
            gasket_bore,
            gasket_thickness: gasket_thk,
            deck_clearance: deck,
            ..Self::default()
        }
    }
}

/// Engine families with stock geometry presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnginePreset {
    FordWindsor,
    FordCleveland,
    ChevySmallBlock,
    ChevyBigBlock,
    MoparLa,
}

impl EnginePreset {
    pub const ALL: [EnginePreset; 5] = [
        EnginePreset::FordWindsor,
        EnginePreset::FordCleveland,
        EnginePreset::ChevySmallBlock,
        EnginePreset::ChevyBigBlock,
        EnginePreset::MoparLa,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            EnginePreset::FordWindsor => "Ford Small Block Windsor",
            EnginePreset::FordCleveland => "Ford Cleveland",
            EnginePreset::ChevySmallBlock => "Chevy Small Block",
            EnginePreset::ChevyBigBlock => "Chevy Big Block",
            EnginePreset::MoparLa => "Mopar LA Small Block",
        }
    }
}

impl fmt::Display for EnginePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for EnginePreset {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "ford_windsor" | "ford_sbw" | "sbf" => Ok(EnginePreset::FordWindsor),
            "ford_cleveland" => Ok(EnginePreset::FordCleveland),
            "chevy_small_block" | "chevy_sbc" | "sbc" => Ok(EnginePreset::ChevySmallBlock),
            "chevy_big_block" | "chevy_bbc" | "bbc" => Ok(EnginePreset::ChevyBigBlock),
            "mopar_la" => Ok(EnginePreset::MoparLa),
            _ => Err(ParseEnumError::new(
                "engine preset",
                s,
                "ford_windsor, ford_cleveland, chevy_small_block, chevy_big_block, mopar_la",
            )),
        }
    }
}

/// Derived cylinder volumes (cubic inches) and ratios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryResult {
    /// Bore cross-section (in²)
    pub bore_area: f64,
    /// Gasket bore cross-section (in²)
    pub gasket_area: f64,
    pub swept_volume: f64,
    pub clearance_volume: f64,
    /// Static compression ratio; `0.0` when undefined
    pub static_cr: f64,
    /// Total displacement (cid); `0.0` when undefined
    pub displacement_cid: f64,
}

impl GeometryResult {
    /// False when the clearance volume is non-positive and the ratios are sentinels
    pub fn is_defined(&self) -> bool {
        self.static_cr > 0.0
    }

    pub fn static_cr(&self) -> Option<f64> {
        self.is_defined().then_some(self.static_cr)
    }

    pub fn displacement_cid(&self) -> Option<f64> {
        (self.is_defined() && self.displacement_cid > 0.0).then_some(self.displacement_cid)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Compute volumes, static CR and displacement.
///
/// Returns `static_cr = 0` and `displacement_cid = 0` when the clearance
/// volume is not positive instead of dividing by zero.
pub fn compute_geometry(geometry: &EngineGeometry) -> GeometryResult {
    let bore = finite_or_zero(geometry.bore);
    let gasket_bore = finite_or_zero(geometry.gasket_bore);

    let bore_area = PI / 4.0 * bore * bore;
    let gasket_area = PI / 4.0 * gasket_bore * gasket_bore;

    let swept_volume = bore_area * finite_or_zero(geometry.stroke);
    let chamber = cc_to_cubic_inches(finite_or_zero(geometry.chamber_cc));
    let piston = cc_to_cubic_inches(finite_or_zero(geometry.piston_cc));
    let gasket = gasket_area * finite_or_zero(geometry.gasket_thickness);
    let deck = bore_area * finite_or_zero(geometry.deck_clearance);

    let clearance_volume = chamber + piston + gasket + deck;

    if clearance_volume <= 0.0 {
        tracing::warn!(
            "Clearance volume {clearance_volume:.4} in³ is not positive; CR undefined"
        );
        return GeometryResult {
            bore_area,
            gasket_area,
            swept_volume,
            clearance_volume,
            static_cr: 0.0,
            displacement_cid: 0.0,
        };
    }

    GeometryResult {
        bore_area,
        gasket_area,
        swept_volume,
        clearance_volume,
        static_cr: (swept_volume + clearance_volume) / clearance_volume,
        displacement_cid: swept_volume * geometry.cylinders as f64,
    }
}

/// Piston travel from TDC (in) at the given crank angle after TDC.
///
/// Returns `None` when the slider-crank root is imaginary.
pub fn piston_position(stroke: f64, rod_length: f64, crank_angle_deg: f64) -> Option<f64> {
    let r = stroke / 2.0;
    let l = rod_length;
    let phi = crank_angle_deg.to_radians();
    let r_sin = r * phi.sin();

    let under_sqrt = l * l - r_sin * r_sin;
    if !under_sqrt.is_finite() || under_sqrt < 0.0 {
        return None;
    }

    Some(r * (1.0 - phi.cos()) + l - under_sqrt.sqrt())
}

/// Dynamic compression ratio from the volume trapped at intake valve closing.
///
/// `ivc_deg` is IVC in degrees ABDC. The crank sits at `180 + ivc` degrees
/// after TDC at that point. Falls back to the static CR when the rod/stroke
/// combination has no real piston position, and returns `0.0` when the
/// geometry itself is undefined.
pub fn dynamic_compression_ratio(
    geometry: &EngineGeometry,
    volumes: &GeometryResult,
    ivc_deg: f64,
) -> f64 {
    if !volumes.is_defined() {
        return 0.0;
    }

    let stroke = finite_or_zero(geometry.stroke);
    let ivc = finite_or_zero(ivc_deg);

    let Some(x) = piston_position(stroke, finite_or_zero(geometry.rod_length), 180.0 + ivc) else {
        tracing::warn!(
            "Imaginary piston position at IVC {ivc}° (rod {}, stroke {stroke}); using static CR",
            geometry.rod_length
        );
        return volumes.static_cr;
    };

    // Never trap more than the full stroke
    let x = x.clamp(0.0, stroke);
    (volumes.clearance_volume + volumes.bore_area * x) / volumes.clearance_volume
}
