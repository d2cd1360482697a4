//! Catalog record types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cam::{estimate_overlap, CamshaftSpec};
use crate::error::{normalize_key, ParseEnumError};
use crate::valvetrain::HeadFlowCurve;

/// Port flow assumed for a head with no flow data (cfm)
pub const DEFAULT_PORT_CFM: f64 = 300.0;

/// Whether a grind is meant for forced induction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostSuitability {
    /// Built for boost
    Yes,
    /// Naturally aspirated only
    No,
    #[default]
    Either,
}

impl fmt::Display for BoostSuitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoostSuitability::Yes => f.write_str("yes"),
            BoostSuitability::No => f.write_str("no"),
            BoostSuitability::Either => f.write_str("either"),
        }
    }
}

impl FromStr for BoostSuitability {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "yes" | "boost" | "true" => Ok(BoostSuitability::Yes),
            "no" | "na" | "false" => Ok(BoostSuitability::No),
            "either" | "any" | "both" => Ok(BoostSuitability::Either),
            _ => Err(ParseEnumError::new("boost suitability", s, "yes, no, either")),
        }
    }
}

/// A camshaft as listed by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamCatalogRecord {
    pub id: String,
    pub make: String,
    pub family: String,
    /// Extra family names the grind is listed under
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family_tags: Vec<String>,
    pub brand: String,
    pub part_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub intake_duration: f64,
    pub exhaust_duration: f64,
    pub lsa: f64,
    pub intake_lift: f64,
    pub exhaust_lift: f64,
    pub peak_hp_rpm: f64,
    #[serde(default)]
    pub boost_suitability: BoostSuitability,
    /// Rocker ratio the lifts are published at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rocker_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl CamCatalogRecord {
    pub fn average_duration(&self) -> f64 {
        (self.intake_duration + self.exhaust_duration) / 2.0
    }

    pub fn duration_split(&self) -> f64 {
        self.exhaust_duration - self.intake_duration
    }

    pub fn overlap(&self) -> f64 {
        estimate_overlap(self.intake_duration, self.exhaust_duration, self.lsa)
    }

    /// "Brand • Name • PN", skipping blank parts
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [
            Some(self.brand.as_str()),
            self.name.as_deref(),
            Some(self.part_number.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
        if parts.is_empty() {
            "Unknown Cam".to_string()
        } else {
            parts.join(" • ")
        }
    }

    /// Load this grind into a cam spec for the estimator. Peak HP rpm
    /// becomes the end of the operating band; figures the catalog does not
    /// carry (IVC, band start) keep their defaults.
    pub fn to_camshaft_spec(&self) -> CamshaftSpec {
        let defaults = CamshaftSpec::default();
        let ratio = self
            .rocker_ratio
            .filter(|r| r.is_finite() && *r > 0.0)
            .or(defaults.published_rocker_ratio);
        CamshaftSpec {
            name: self.name.clone().unwrap_or_else(|| self.label()),
            intake_duration: self.intake_duration,
            exhaust_duration: self.exhaust_duration,
            lsa: self.lsa,
            intake_lift: self.intake_lift,
            exhaust_lift: self.exhaust_lift,
            rpm_end: self.peak_hp_rpm,
            published_rocker_ratio: ratio,
            rocker_ratio: ratio,
            ..defaults
        }
    }
}

/// A cylinder head as listed by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadCatalogRecord {
    pub id: String,
    pub make: String,
    pub family: String,
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chamber_cc: Option<f64>,
    #[serde(default)]
    pub flow_curve: HeadFlowCurve,
}

impl HeadCatalogRecord {
    /// Headline intake flow, [`DEFAULT_PORT_CFM`] when the curve is empty
    pub fn peak_intake_flow(&self) -> f64 {
        self.flow_curve
            .peak_intake_flow()
            .filter(|flow| *flow > 0.0)
            .unwrap_or(DEFAULT_PORT_CFM)
    }

    pub fn label(&self) -> String {
        let parts: Vec<&str> = [
            Some(self.brand.as_str()),
            self.part_name.as_deref().or(self.part_number.as_deref()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
        if parts.is_empty() {
            "Cylinder Head".to_string()
        } else {
            parts.join(" • ")
        }
    }
}
