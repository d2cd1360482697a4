//! Unit Conversion Functions
//!
//! The engine formulas work in inches, cubic inches, horsepower, lb·ft and
//! psi. Metric values are converted at the edge with these helpers:
//! - Length: inches ↔ millimeters
//! - Volume: cc ↔ cubic inches, CID ↔ liters
//! - Power: hp ↔ kW
//! - Torque: lb·ft ↔ N·m
//! - Pressure: psi ↔ kPa / bar
//! - Air-Fuel Ratio: Lambda ↔ AFR (per fuel)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{normalize_key, ParseEnumError};
use crate::performance::FuelType;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Cubic inches per cubic centimeter
pub const CUBIC_INCHES_PER_CC: f64 = 0.0610237441;

/// Cubic inches per liter
pub const CID_PER_LITER: f64 = 61.0237441;

/// Kilowatts per mechanical horsepower
pub const KW_PER_HP: f64 = 0.745699872;

/// Newton-meters per pound-foot
pub const NM_PER_LBFT: f64 = 1.3558179483;

/// Convert inches to millimeters
pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Convert millimeters to inches
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Convert cubic centimeters to cubic inches
pub fn cc_to_cubic_inches(cc: f64) -> f64 {
    cc * CUBIC_INCHES_PER_CC
}

/// Convert cubic inches to cubic centimeters
pub fn cubic_inches_to_cc(cubic_inches: f64) -> f64 {
    cubic_inches / CUBIC_INCHES_PER_CC
}

/// Convert displacement in liters to cubic inches
pub fn liters_to_cid(liters: f64) -> f64 {
    liters * CID_PER_LITER
}

/// Convert displacement in cubic inches to liters
pub fn cid_to_liters(cid: f64) -> f64 {
    cid / CID_PER_LITER
}

/// Convert horsepower to kilowatts
pub fn hp_to_kw(hp: f64) -> f64 {
    hp * KW_PER_HP
}

/// Convert kilowatts to horsepower
pub fn kw_to_hp(kw: f64) -> f64 {
    kw / KW_PER_HP
}

/// Convert lb·ft to N·m
pub fn lbft_to_nm(lbft: f64) -> f64 {
    lbft * NM_PER_LBFT
}

/// Convert N·m to lb·ft
pub fn nm_to_lbft(nm: f64) -> f64 {
    nm / NM_PER_LBFT
}

/// Convert kPa to PSI
pub fn kpa_to_psi(kpa: f64) -> f64 {
    kpa * 0.14503773773020923
}

/// Convert PSI to kPa
pub fn psi_to_kpa(psi: f64) -> f64 {
    psi / 0.14503773773020923
}

/// Convert bar to PSI
pub fn bar_to_psi(bar: f64) -> f64 {
    bar * 14.503773773020923
}

/// Convert PSI to bar
pub fn psi_to_bar(psi: f64) -> f64 {
    psi / 14.503773773020923
}

/// Convert Lambda to AFR for the given fuel
pub fn lambda_to_afr(lambda: f64, fuel: FuelType) -> f64 {
    lambda * fuel.stoich_afr()
}

/// Convert AFR to Lambda for the given fuel
pub fn afr_to_lambda(afr: f64, fuel: FuelType) -> f64 {
    afr / fuel.stoich_afr()
}

/// Presentation unit system. The engine itself always runs imperial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    pub fn length_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "in",
            UnitSystem::Metric => "mm",
        }
    }

    pub fn displacement_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "cid",
            UnitSystem::Metric => "L",
        }
    }

    pub fn power_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "hp",
            UnitSystem::Metric => "kW",
        }
    }

    pub fn torque_symbol(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "lb-ft",
            UnitSystem::Metric => "N-m",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Imperial => f.write_str("imperial"),
            UnitSystem::Metric => f.write_str("metric"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "imperial" | "std" | "standard" => Ok(UnitSystem::Imperial),
            "metric" | "met" => Ok(UnitSystem::Metric),
            _ => Err(ParseEnumError::new("unit system", s, "imperial, metric")),
        }
    }
}
