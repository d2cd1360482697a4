//! Raw catalog rows → catalog records
//!
//! Catalog rows come from hand-entered and scraped sources: numbers may be
//! JSON numbers or comma-formatted strings, and LSA, lift and peak-power rpm
//! are often missing. Missing figures are estimated from the average
//! duration. Rows without durations, make or family are dropped.

use serde::Deserialize;
use serde_json::Value;

use super::error::CatalogError;
use super::records::{BoostSuitability, CamCatalogRecord, HeadCatalogRecord};
use crate::valvetrain::{FlowSample, HeadFlowCurve};

/// A cam row as the catalog service returns it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCamRow {
    pub id: Option<String>,
    #[serde(alias = "engine_make")]
    pub make: Option<String>,
    #[serde(alias = "engine_family")]
    pub family: Option<String>,
    pub family_tags: Option<Vec<String>>,
    pub brand: Option<String>,
    #[serde(alias = "part_number")]
    pub pn: Option<String>,
    pub cam_name: Option<String>,
    #[serde(alias = "duration_int_050")]
    pub dur_int_050: Value,
    #[serde(alias = "duration_exh_050")]
    pub dur_exh_050: Value,
    pub lsa: Value,
    pub lift_int: Value,
    pub lift_exh: Value,
    #[serde(alias = "rpm_end")]
    pub peak_hp_rpm: Value,
    pub rocker_ratio: Value,
    pub boost_ok: Option<String>,
    pub notes: Option<String>,
    pub source_url: Option<String>,
    /// Older rows keep their figures in a nested `spec` object
    pub spec: Option<RawCamSpec>,
}

/// Nested cam figures consulted when the flat columns are empty
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCamSpec {
    pub engine_make: Option<String>,
    pub engine_family: Option<String>,
    pub brand: Option<String>,
    pub part_number: Option<String>,
    pub cam_name: Option<String>,
    #[serde(alias = "duration_int_050", alias = "durInt050")]
    pub dur_int_050: Value,
    #[serde(alias = "duration_exh_050", alias = "durExh050")]
    pub dur_exh_050: Value,
    pub lsa: Value,
    pub lift_int: Value,
    pub lift_exh: Value,
    #[serde(alias = "rpmEnd")]
    pub rpm_end: Value,
    pub induction: Option<String>,
    #[serde(alias = "inductionPreference")]
    pub induction_preference: Option<String>,
    pub notes: Option<String>,
}

/// One flow-bench reading as stored by the catalog
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFlowPoint {
    pub lift: Value,
    #[serde(alias = "intakeFlow")]
    pub intake_flow: Value,
    #[serde(alias = "exhaustFlow")]
    pub exhaust_flow: Value,
}

/// A cylinder head row as the catalog service returns it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHeadRow {
    pub id: Option<String>,
    #[serde(alias = "engine_make")]
    pub make: Option<String>,
    #[serde(alias = "engine_family")]
    pub family: Option<String>,
    pub brand: Option<String>,
    #[serde(alias = "head_name")]
    pub part_name: Option<String>,
    pub part_number: Option<String>,
    #[serde(alias = "chamber_volume")]
    pub chamber_cc: Value,
    pub flow_data: Vec<RawFlowPoint>,
}

/// Response envelope of the catalog service
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogEnvelope {
    pub ok: bool,
    pub message: Option<String>,
    pub cams: Vec<RawCamRow>,
    pub heads: Vec<RawHeadRow>,
}

impl CatalogEnvelope {
    /// Decode a payload, turning `ok: false` into [`CatalogError::Rejected`]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let envelope: CatalogEnvelope = serde_json::from_str(json)?;
        if !envelope.ok {
            let message = envelope
                .message
                .unwrap_or_else(|| "catalog returned ok: false".to_string());
            return Err(CatalogError::Rejected(message));
        }
        Ok(envelope)
    }

    /// Normalized cams; unusable rows are dropped
    pub fn cam_records(&self) -> Vec<CamCatalogRecord> {
        normalize_rows(&self.cams, RawCamRow::normalize)
    }

    /// Normalized heads; unusable rows are dropped
    pub fn head_records(&self) -> Vec<HeadCatalogRecord> {
        normalize_rows(&self.heads, RawHeadRow::normalize)
    }
}

fn normalize_rows<R, T>(rows: &[R], normalize: fn(&R) -> Option<T>) -> Vec<T> {
    let records: Vec<T> = rows.iter().filter_map(normalize).collect();
    if records.len() < rows.len() {
        tracing::debug!(
            "Dropped {} of {} catalog rows during normalization",
            rows.len() - records.len(),
            rows.len()
        );
    }
    records
}

/// Accept a finite JSON number or a numeric string (commas ignored)
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let cleaned = s.replace(',', "");
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_number(values: &[&Value]) -> Option<f64> {
    values.iter().find_map(|v| coerce_number(v))
}

fn first_text(values: &[Option<&str>]) -> Option<String> {
    values.iter().find_map(|v| clean_text(*v))
}

/// Peak-power rpm estimated from average duration @ .050
pub fn guess_peak_rpm(intake_duration: f64, exhaust_duration: f64) -> f64 {
    let avg = (intake_duration + exhaust_duration) / 2.0;
    (3000.0 + (avg - 200.0) * 35.0).round().clamp(2500.0, 9000.0)
}

/// LSA estimated from duration: bigger cams run tighter, wide splits wider
pub fn guess_lsa(intake_duration: f64, exhaust_duration: f64) -> f64 {
    let avg = (intake_duration + exhaust_duration) / 2.0;
    let mut lsa: f64 = if avg >= 250.0 {
        110.0
    } else if avg >= 235.0 {
        111.0
    } else if avg <= 205.0 {
        115.0
    } else if avg <= 215.0 {
        114.0
    } else {
        112.0
    };

    let split = (exhaust_duration - intake_duration).abs();
    if split >= 12.0 {
        lsa += 0.5;
    }
    if split <= 6.0 {
        lsa -= 0.5;
    }
    round_to(lsa.clamp(106.0, 118.0), 1)
}

/// Intake valve lift estimated from average duration
pub fn guess_lift(intake_duration: f64, exhaust_duration: f64) -> f64 {
    let avg = (intake_duration + exhaust_duration) / 2.0;
    round_to((0.44 + (avg - 200.0) * 0.002).clamp(0.38, 0.75), 3)
}

/// An explicit `yes`/`no`/`either` tag; anything else is no tag at all
pub fn parse_boost_tag(tag: Option<&str>) -> Option<BoostSuitability> {
    match tag.map(|t| t.trim().to_lowercase()).as_deref() {
        Some("yes") => Some(BoostSuitability::Yes),
        Some("no") => Some(BoostSuitability::No),
        Some("either") => Some(BoostSuitability::Either),
        _ => None,
    }
}

/// Infer boost suitability from free text, then from LSA
pub fn derive_boost_status(lsa: Option<f64>, texts: &[Option<&str>]) -> BoostSuitability {
    let haystack = texts
        .iter()
        .flatten()
        .map(|t| t.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    if ["boost", "turbo", "blower"].iter().any(|w| haystack.contains(w)) {
        return BoostSuitability::Yes;
    }
    if haystack.contains("na only") || haystack.contains("naturally aspirated") {
        return BoostSuitability::No;
    }
    match lsa {
        Some(lsa) if lsa >= 113.5 => BoostSuitability::Yes,
        Some(lsa) if lsa <= 110.0 => BoostSuitability::No,
        _ => BoostSuitability::Either,
    }
}

impl RawCamRow {
    pub fn normalize(&self) -> Option<CamCatalogRecord> {
        let fallback = RawCamSpec::default();
        let spec = self.spec.as_ref().unwrap_or(&fallback);

        let intake_duration = first_number(&[&self.dur_int_050, &spec.dur_int_050])?;
        let exhaust_duration = first_number(&[&self.dur_exh_050, &spec.dur_exh_050])?;
        let make = first_text(&[self.make.as_deref(), spec.engine_make.as_deref()])?;
        let family = first_text(&[self.family.as_deref(), spec.engine_family.as_deref()])?;

        let published_lsa = first_number(&[&self.lsa, &spec.lsa]);
        let lsa = published_lsa.unwrap_or_else(|| guess_lsa(intake_duration, exhaust_duration));

        let guessed_lift = guess_lift(intake_duration, exhaust_duration);
        let intake_lift = first_number(&[&self.lift_int, &spec.lift_int]).unwrap_or(guessed_lift);
        let exhaust_lift = first_number(&[&self.lift_exh, &spec.lift_exh])
            .unwrap_or_else(|| round_to(guessed_lift + 0.008, 3));

        let peak_hp_rpm = first_number(&[&self.peak_hp_rpm, &spec.rpm_end])
            .unwrap_or_else(|| guess_peak_rpm(intake_duration, exhaust_duration));

        let name = first_text(&[self.cam_name.as_deref(), spec.cam_name.as_deref()]);
        let notes = first_text(&[self.notes.as_deref(), spec.notes.as_deref()]);
        let boost_suitability = parse_boost_tag(self.boost_ok.as_deref()).unwrap_or_else(|| {
            derive_boost_status(
                published_lsa,
                &[
                    spec.induction.as_deref(),
                    spec.induction_preference.as_deref(),
                    notes.as_deref(),
                    name.as_deref(),
                ],
            )
        });

        let brand = first_text(&[self.brand.as_deref(), spec.brand.as_deref()])
            .unwrap_or_else(|| "Unknown".to_string());
        let part_number = first_text(&[self.pn.as_deref(), spec.part_number.as_deref()])
            .unwrap_or_else(|| "NO-PN".to_string());
        let id = clean_text(self.id.as_deref()).unwrap_or_else(|| format!("{brand}-{part_number}"));

        Some(CamCatalogRecord {
            id,
            make,
            family,
            family_tags: self
                .family_tags
                .iter()
                .flatten()
                .filter_map(|tag| clean_text(Some(tag.as_str())))
                .collect(),
            brand,
            part_number,
            name,
            intake_duration,
            exhaust_duration,
            lsa,
            intake_lift,
            exhaust_lift,
            peak_hp_rpm,
            boost_suitability,
            rocker_ratio: coerce_number(&self.rocker_ratio).filter(|r| *r > 0.0),
            notes,
            source_url: clean_text(self.source_url.as_deref()),
        })
    }
}

impl RawHeadRow {
    pub fn normalize(&self) -> Option<HeadCatalogRecord> {
        let make = clean_text(self.make.as_deref())?;
        let family = clean_text(self.family.as_deref())?;
        let brand = clean_text(self.brand.as_deref()).unwrap_or_else(|| "Unknown".to_string());
        let part_name = clean_text(self.part_name.as_deref());
        let part_number = clean_text(self.part_number.as_deref());

        let samples = self
            .flow_data
            .iter()
            .filter_map(|point| {
                let lift = coerce_number(&point.lift)?;
                Some(FlowSample::new(
                    lift,
                    coerce_number(&point.intake_flow),
                    coerce_number(&point.exhaust_flow),
                ))
            })
            .collect();

        let id = clean_text(self.id.as_deref()).unwrap_or_else(|| {
            let part = part_name.as_deref().or(part_number.as_deref()).unwrap_or("head");
            format!("{brand}-{part}")
        });

        Some(HeadCatalogRecord {
            id,
            make,
            family,
            brand,
            part_name,
            part_number,
            chamber_cc: coerce_number(&self.chamber_cc).filter(|cc| *cc > 0.0),
            flow_curve: HeadFlowCurve::new(samples),
        })
    }
}
