//! Ideal cam spec for a power goal
//!
//! Produces a single point estimate used as the scoring reference. It is not
//! a catalog lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RecommendationRequest;
use crate::cam::estimate_overlap;
use crate::error::{normalize_key, ParseEnumError};

/// Naturally aspirated or forced induction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Induction {
    #[default]
    #[serde(rename = "na")]
    NaturallyAspirated,
    Boost,
}

/// What the engine is for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    #[default]
    Street,
    Strip,
    Truck,
}

/// How the idle should sound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdlePreference {
    Smooth,
    #[default]
    #[serde(alias = "chop")]
    Choppy,
    #[serde(alias = "dontcare")]
    DontCare,
}

impl Induction {
    pub fn is_boosted(&self) -> bool {
        matches!(self, Induction::Boost)
    }
}

impl fmt::Display for Induction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Induction::NaturallyAspirated => f.write_str("na"),
            Induction::Boost => f.write_str("boost"),
        }
    }
}

impl FromStr for Induction {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "na" | "n/a" | "naturally_aspirated" | "natural" => Ok(Induction::NaturallyAspirated),
            "boost" | "boosted" | "turbo" | "supercharged" | "forced" => Ok(Induction::Boost),
            _ => Err(ParseEnumError::new("induction", s, "na, boost")),
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Usage::Street => f.write_str("street"),
            Usage::Strip => f.write_str("strip"),
            Usage::Truck => f.write_str("truck"),
        }
    }
}

impl FromStr for Usage {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "street" => Ok(Usage::Street),
            "strip" | "race" | "drag" => Ok(Usage::Strip),
            "truck" | "towing" => Ok(Usage::Truck),
            _ => Err(ParseEnumError::new("usage", s, "street, strip, truck")),
        }
    }
}

impl fmt::Display for IdlePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdlePreference::Smooth => f.write_str("smooth"),
            IdlePreference::Choppy => f.write_str("choppy"),
            IdlePreference::DontCare => f.write_str("dont_care"),
        }
    }
}

impl FromStr for IdlePreference {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "smooth" => Ok(IdlePreference::Smooth),
            "choppy" | "chop" | "lopey" => Ok(IdlePreference::Choppy),
            "dont_care" | "dontcare" | "don't_care" | "any" => Ok(IdlePreference::DontCare),
            _ => Err(ParseEnumError::new(
                "idle preference",
                s,
                "smooth, choppy, dont_care",
            )),
        }
    }
}

/// Synthesized ideal cam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Intake duration @ .050, whole degrees
    pub intake_duration: f64,
    /// Exhaust duration @ .050, whole degrees
    pub exhaust_duration: f64,
    pub lsa: f64,
    pub intake_lift: f64,
    pub exhaust_lift: f64,
    /// Low end of the usable rpm band
    pub rpm_band_low: f64,
    /// High end of the usable rpm band
    pub rpm_band_high: f64,
    /// Target HP per cubic inch, rounded to 0.01
    pub hp_per_cid: f64,
}

impl TargetSpec {
    pub fn average_duration(&self) -> f64 {
        (self.intake_duration + self.exhaust_duration) / 2.0
    }

    pub fn duration_split(&self) -> f64 {
        self.exhaust_duration - self.intake_duration
    }

    pub fn overlap(&self) -> f64 {
        estimate_overlap(self.intake_duration, self.exhaust_duration, self.lsa)
    }
}

fn round_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Derive the ideal cam for a request. The request must already be valid
/// (positive displacement, power and rpm).
pub fn synthesize_target(request: &RecommendationRequest) -> TargetSpec {
    let boost = request.induction.is_boosted();
    let usage = request.usage;
    let idle = request.idle;
    let cid = request.displacement_cid;
    let rpm = request.peak_rpm;
    let hp_per_cid = request.target_hp / cid;

    let mut lsa: f64 = if boost { 114.0 } else { 112.0 };
    match (usage, boost) {
        (Usage::Truck, true) => lsa = 114.0,
        (Usage::Truck, false) => lsa = 112.0,
        (Usage::Strip, false) => lsa = 110.0,
        _ => {}
    }

    let mut dur_avg = 218.0 + (hp_per_cid - 1.2) * 70.0 + ((rpm - 6000.0) / 500.0) * 4.0;
    if boost {
        dur_avg -= 6.0;
    }
    dur_avg += match usage {
        Usage::Truck => -10.0,
        Usage::Strip => 6.0,
        Usage::Street => 0.0,
    };

    let mut split: f64 = if boost { 6.0 } else { 8.0 };
    match (usage, boost) {
        (Usage::Truck, _) => split = 6.0,
        (Usage::Strip, false) => split = 10.0,
        _ => {}
    }

    match idle {
        IdlePreference::Choppy => {
            lsa -= 1.5;
            dur_avg += 4.0;
            split += 2.0;
        }
        IdlePreference::Smooth => {
            lsa += 1.5;
            dur_avg -= 4.0;
            split -= 2.0;
        }
        IdlePreference::DontCare => {}
    }

    let dur_avg = dur_avg.clamp(200.0, 252.0);
    let split = split.clamp(4.0, 12.0);
    let lsa = lsa.clamp(104.0, 118.0);

    let mut lift = 0.5 + (cid - 300.0) / 4000.0;
    lift += match usage {
        Usage::Strip => 0.02,
        Usage::Truck => -0.015,
        Usage::Street => 0.0,
    };
    if boost {
        lift += 0.005;
    }
    let lift = lift.clamp(0.42, 0.70);
    let exhaust_bump = if boost { 0.005 } else { 0.01 };

    TargetSpec {
        intake_duration: (dur_avg - split / 2.0).round(),
        exhaust_duration: (dur_avg + split / 2.0).round(),
        lsa,
        intake_lift: round_thousandths(lift),
        exhaust_lift: round_thousandths(lift + exhaust_bump),
        rpm_band_low: (rpm - 1000.0).round().max(2500.0),
        rpm_band_high: (rpm + 600.0).round(),
        hp_per_cid: (hp_per_cid * 100.0).round() / 100.0,
    }
}
