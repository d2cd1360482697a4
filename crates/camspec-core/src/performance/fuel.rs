//! Fuel models and the AFR power correction

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::calibration::Calibration;
use crate::error::{normalize_key, ParseEnumError};

/// Fuel family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    #[serde(rename = "pump91")]
    Pump91,
    #[default]
    #[serde(rename = "pump93")]
    Pump93,
    RaceGas,
    #[serde(rename = "e85")]
    E85,
}

/// Characteristics of one fuel family
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelModel {
    pub name: &'static str,
    /// AFR that makes best power
    pub best_power_afr: f64,
    /// Usable AFR window either side of best power
    pub afr_tolerance: f64,
    /// Flat power multiplier (ignored for E85, which has its own boost curve)
    pub power_multiplier: f64,
    /// How strongly charge heat under boost costs power, 1.0 = pump 93
    pub heat_sensitivity: f64,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Pump91,
        FuelType::Pump93,
        FuelType::RaceGas,
        FuelType::E85,
    ];

    pub fn model(&self) -> FuelModel {
        match self {
            FuelType::Pump91 => FuelModel {
                name: "91",
                best_power_afr: 12.7,
                afr_tolerance: 0.65,
                power_multiplier: 0.985,
                heat_sensitivity: 1.1,
            },
            FuelType::Pump93 => FuelModel {
                name: "93",
                best_power_afr: 12.8,
                afr_tolerance: 0.65,
                power_multiplier: 1.0,
                heat_sensitivity: 1.0,
            },
            FuelType::RaceGas => FuelModel {
                name: "Race Gas",
                best_power_afr: 12.9,
                afr_tolerance: 0.7,
                power_multiplier: 1.02,
                heat_sensitivity: 0.9,
            },
            FuelType::E85 => FuelModel {
                name: "E85",
                best_power_afr: 7.9,
                afr_tolerance: 0.55,
                power_multiplier: 1.0,
                heat_sensitivity: 0.78,
            },
        }
    }

    /// Stoichiometric AFR
    pub fn stoich_afr(&self) -> f64 {
        match self {
            FuelType::E85 => 9.8,
            _ => 14.7,
        }
    }

    pub fn is_e85(&self) -> bool {
        matches!(self, FuelType::E85)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelType::Pump91 => f.write_str("pump91"),
            FuelType::Pump93 => f.write_str("pump93"),
            FuelType::RaceGas => f.write_str("race_gas"),
            FuelType::E85 => f.write_str("e85"),
        }
    }
}

impl FromStr for FuelType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        let key = key.strip_prefix("pump").unwrap_or(&key).trim_start_matches('_');
        match key {
            "91" => Ok(FuelType::Pump91),
            "93" => Ok(FuelType::Pump93),
            "race_gas" | "racegas" | "race" | "110" | "116" => Ok(FuelType::RaceGas),
            "e85" | "ethanol" => Ok(FuelType::E85),
            _ => Err(ParseEnumError::new(
                "fuel type",
                s,
                "pump91, pump93, race_gas, e85",
            )),
        }
    }
}

/// Power multiplier for running `afr` instead of the fuel's best-power AFR.
///
/// A Gaussian about `best_power_afr`, floored so AFR alone never costs more
/// than a few percent.
pub fn afr_multiplier(afr: f64, best_power_afr: f64, cal: &Calibration) -> f64 {
    let z = (afr - best_power_afr) / cal.afr_sigma;
    (-0.5 * z * z).exp().clamp(cal.afr_floor, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_parsing_accepts_original_keys() {
        assert_eq!("pump91".parse::<FuelType>().unwrap(), FuelType::Pump91);
        assert_eq!("93".parse::<FuelType>().unwrap(), FuelType::Pump93);
        assert_eq!("Race Gas".parse::<FuelType>().unwrap(), FuelType::RaceGas);
        assert_eq!("116".parse::<FuelType>().unwrap(), FuelType::RaceGas);
        assert_eq!("Ethanol".parse::<FuelType>().unwrap(), FuelType::E85);
        assert!("diesel".parse::<FuelType>().is_err());
    }

    #[test]
    fn display_parses_back() {
        for fuel in FuelType::ALL {
            assert_eq!(fuel.to_string().parse::<FuelType>().unwrap(), fuel);
        }
    }

    #[test]
    fn serde_uses_original_keys() {
        assert_eq!(serde_json::to_string(&FuelType::Pump93).unwrap(), "\"pump93\"");
        assert_eq!(serde_json::to_string(&FuelType::RaceGas).unwrap(), "\"race_gas\"");
        let fuel: FuelType = serde_json::from_str("\"e85\"").unwrap();
        assert_eq!(fuel, FuelType::E85);
    }

    #[test]
    fn afr_multiplier_peaks_at_best_power() {
        let cal = Calibration::default();
        assert_eq!(afr_multiplier(12.8, 12.8, &cal), 1.0);
        let rich = afr_multiplier(12.6, 12.8, &cal);
        assert!(rich < 1.0 && rich > 0.965);
        assert_eq!(afr_multiplier(12.0, 12.8, &cal), 0.965);
        assert_eq!(afr_multiplier(18.0, 12.8, &cal), 0.965);
    }
}
