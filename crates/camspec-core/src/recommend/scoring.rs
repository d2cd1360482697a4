//! Cam matching and scoring
//!
//! Distance of a catalog cam from the [`TargetSpec`], lower is closer:
//! - Average duration delta (x1.8) and split delta (x0.6)
//! - LSA delta (x3), the dominant term
//! - Lift deltas in thousandths (x0.06)
//! - Peak HP rpm delta in hundreds (x1.2)
//! - Induction and idle preference penalties

use serde::{Deserialize, Serialize};

use super::family::families_overlap;
use super::target::{IdlePreference, Induction, TargetSpec};
use crate::cam::estimate_overlap;
use crate::catalog::{BoostSuitability, CamCatalogRecord};

/// LSA assumed when a record carries none
pub const FALLBACK_LSA: f64 = 112.0;

const DURATION_WEIGHT: f64 = 1.8;
const SPLIT_WEIGHT: f64 = 0.6;
const LSA_WEIGHT: f64 = 3.0;
const LIFT_WEIGHT: f64 = 0.06;
const RPM_WEIGHT: f64 = 1.2;

const BOOST_MISMATCH_PENALTY: f64 = 50.0;
const NA_BOOST_BIAS_PENALTY: f64 = 4.0;

/// Where a candidate came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateOrigin {
    #[default]
    Catalog,
    /// Generated from the power goal, not a real part
    Synthesized,
}

/// A cam with its distance from the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub record: CamCatalogRecord,
    pub distance: f64,
    /// 0-100, higher is closer
    pub match_percent: u8,
    pub origin: CandidateOrigin,
}

impl ScoredCandidate {
    pub fn is_synthesized(&self) -> bool {
        self.origin == CandidateOrigin::Synthesized
    }
}

fn present_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Weighted distance between a cam and the target.
///
/// Zero figures on the record stand in for missing data: LSA falls back to
/// 112, lifts to the target lifts and peak rpm to the requested peak rpm.
pub fn cam_distance(
    cam: &CamCatalogRecord,
    target: &TargetSpec,
    peak_rpm: f64,
    induction: Induction,
    idle: IdlePreference,
) -> f64 {
    let lsa = present_or(cam.lsa, FALLBACK_LSA);
    let intake_lift = present_or(cam.intake_lift, target.intake_lift);
    let exhaust_lift = present_or(cam.exhaust_lift, target.exhaust_lift);
    let cam_rpm = present_or(cam.peak_hp_rpm, peak_rpm);

    let mut distance = (cam.average_duration() - target.average_duration()).abs() * DURATION_WEIGHT
        + (cam.duration_split() - target.duration_split()).abs() * SPLIT_WEIGHT
        + (lsa - target.lsa).abs() * LSA_WEIGHT
        + (intake_lift - target.intake_lift).abs() * 1000.0 * LIFT_WEIGHT
        + (exhaust_lift - target.exhaust_lift).abs() * 1000.0 * LIFT_WEIGHT
        + ((cam_rpm - peak_rpm) / 100.0).abs() * RPM_WEIGHT;

    match (induction, cam.boost_suitability) {
        (Induction::Boost, BoostSuitability::No) => distance += BOOST_MISMATCH_PENALTY,
        (Induction::NaturallyAspirated, BoostSuitability::Yes) => {
            distance += NA_BOOST_BIAS_PENALTY
        }
        _ => {}
    }

    let overlap = estimate_overlap(cam.intake_duration, cam.exhaust_duration, lsa);
    let target_overlap = target.overlap();
    match idle {
        IdlePreference::Choppy => {
            if lsa > target.lsa + 0.5 {
                distance += (lsa - target.lsa) * 3.2;
            }
            if overlap < target_overlap - 1.0 {
                distance += (target_overlap - overlap) * 0.35;
            }
        }
        IdlePreference::Smooth => {
            if lsa < target.lsa - 0.5 {
                distance += (target.lsa - lsa) * 2.4;
            }
            if overlap > target_overlap + 1.0 {
                distance += (overlap - target_overlap) * 0.3;
            }
        }
        IdlePreference::DontCare => {}
    }

    distance
}

/// Match percentage for a distance, rounded to a whole percent
pub fn match_percentage(distance: f64) -> u8 {
    if !distance.is_finite() {
        return 0;
    }
    (100.0 - distance * 1.25).round().clamp(0.0, 100.0) as u8
}

/// Same make, overlapping family (by name or tag), and not an NA-only grind
/// when boost is requested.
pub fn is_eligible(cam: &CamCatalogRecord, make: &str, family: &str, induction: Induction) -> bool {
    if !cam.make.trim().eq_ignore_ascii_case(make.trim()) {
        return false;
    }
    let family_match = families_overlap(&cam.family, family)
        || cam.family_tags.iter().any(|tag| families_overlap(tag, family));
    if !family_match {
        return false;
    }
    !(induction.is_boosted() && cam.boost_suitability == BoostSuitability::No)
}

/// Score every cam and sort ascending by distance. The sort is stable, so
/// ties keep their input order.
pub fn score_candidates(
    cams: impl IntoIterator<Item = (CamCatalogRecord, CandidateOrigin)>,
    target: &TargetSpec,
    peak_rpm: f64,
    induction: Induction,
    idle: IdlePreference,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = cams
        .into_iter()
        .map(|(record, origin)| {
            let distance = cam_distance(&record, target, peak_rpm, induction, idle);
            ScoredCandidate {
                match_percent: match_percentage(distance),
                record,
                distance,
                origin,
            }
        })
        .collect();
    scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    scored
}
