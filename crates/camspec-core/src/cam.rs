//! Camshaft specification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{normalize_key, ParseEnumError};
use crate::valvetrain::DEFAULT_ROCKER_RATIO;

/// Lifter style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TappetType {
    Flat,
    #[default]
    Roller,
}

impl fmt::Display for TappetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TappetType::Flat => f.write_str("flat"),
            TappetType::Roller => f.write_str("roller"),
        }
    }
}

impl FromStr for TappetType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "flat" | "flat_tappet" | "hydraulic_flat" | "solid_flat" => Ok(TappetType::Flat),
            "roller" | "hydraulic_roller" | "solid_roller" => Ok(TappetType::Roller),
            _ => Err(ParseEnumError::new("tappet type", s, "flat, roller")),
        }
    }
}

/// Cam card figures. Durations are @ 0.050" tappet lift, lifts are at the valve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CamshaftSpec {
    pub name: String,
    /// Intake duration @ .050 (deg)
    pub intake_duration: f64,
    /// Exhaust duration @ .050 (deg)
    pub exhaust_duration: f64,
    /// Lobe separation angle (deg)
    pub lsa: f64,
    /// Intake valve closing @ .050 (deg ABDC)
    pub ivc: f64,
    /// Intake valve lift (in) at the published rocker ratio
    pub intake_lift: f64,
    /// Exhaust valve lift (in) at the published rocker ratio
    pub exhaust_lift: f64,
    /// Start of the operating band (rpm)
    pub rpm_start: f64,
    /// End of the operating band (rpm); peak power is placed here
    pub rpm_end: f64,
    /// Rocker ratio the lifts were published at
    pub published_rocker_ratio: Option<f64>,
    /// Rocker ratio actually installed
    pub rocker_ratio: Option<f64>,
    pub tappet: TappetType,
}

impl Default for CamshaftSpec {
    fn default() -> Self {
        Self {
            name: "F303+".to_string(),
            intake_duration: 226.0,
            exhaust_duration: 234.0,
            lsa: 114.0,
            ivc: 43.0,
            intake_lift: 0.585,
            exhaust_lift: 0.574,
            rpm_start: 3000.0,
            rpm_end: 6500.0,
            published_rocker_ratio: Some(DEFAULT_ROCKER_RATIO),
            rocker_ratio: Some(DEFAULT_ROCKER_RATIO),
            tappet: TappetType::Roller,
        }
    }
}

/// Use `value` unless it is zero or not finite.
pub(crate) fn or_fallback(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        fallback
    }
}

impl CamshaftSpec {
    /// Replace zero or non-finite figures with the generic defaults a blank
    /// cam card falls back to.
    pub fn normalized(&self) -> Self {
        let name = self.name.trim();
        Self {
            name: if name.is_empty() {
                "Custom Cam".to_string()
            } else {
                name.to_string()
            },
            intake_duration: or_fallback(self.intake_duration, 230.0),
            exhaust_duration: or_fallback(self.exhaust_duration, 236.0),
            lsa: or_fallback(self.lsa, 110.0),
            ivc: or_fallback(self.ivc, 70.0),
            intake_lift: or_fallback(self.intake_lift, 0.5),
            exhaust_lift: or_fallback(self.exhaust_lift, 0.5),
            rpm_start: or_fallback(self.rpm_start, 3000.0),
            rpm_end: or_fallback(self.rpm_end, 6500.0),
            ..self.clone()
        }
    }

    pub fn average_duration(&self) -> f64 {
        (self.intake_duration + self.exhaust_duration) / 2.0
    }

    /// Exhaust minus intake duration
    pub fn duration_split(&self) -> f64 {
        self.exhaust_duration - self.intake_duration
    }

    /// Overlap estimate @ .050 (deg)
    pub fn overlap(&self) -> f64 {
        estimate_overlap(self.intake_duration, self.exhaust_duration, self.lsa)
    }
}

/// Valve overlap estimate from durations and lobe separation
pub fn estimate_overlap(intake_duration: f64, exhaust_duration: f64, lsa: f64) -> f64 {
    intake_duration + exhaust_duration - 2.0 * lsa
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_fills_blank_card() {
        let blank = CamshaftSpec {
            name: "  ".to_string(),
            intake_duration: 0.0,
            exhaust_duration: f64::NAN,
            lsa: 0.0,
            ivc: 0.0,
            intake_lift: 0.0,
            exhaust_lift: 0.0,
            rpm_start: 0.0,
            rpm_end: 0.0,
            ..CamshaftSpec::default()
        };
        let cam = blank.normalized();
        assert_eq!(cam.name, "Custom Cam");
        assert_eq!(cam.intake_duration, 230.0);
        assert_eq!(cam.exhaust_duration, 236.0);
        assert_eq!(cam.lsa, 110.0);
        assert_eq!(cam.ivc, 70.0);
        assert_eq!(cam.rpm_end, 6500.0);
    }

    #[test]
    fn derived_figures() {
        let cam = CamshaftSpec::default();
        assert_eq!(cam.average_duration(), 230.0);
        assert_eq!(cam.duration_split(), 8.0);
        assert_eq!(cam.overlap(), 232.0);
    }

    #[test]
    fn tappet_parsing() {
        assert_eq!("Hydraulic Roller".parse::<TappetType>().unwrap(), TappetType::Roller);
        assert_eq!("flat".parse::<TappetType>().unwrap(), TappetType::Flat);
        assert!("needle".parse::<TappetType>().is_err());
    }
}
