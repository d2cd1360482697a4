//! Synthesized fallback grinds
//!
//! When the catalog has too few matches, two grinds are generated from the
//! power goal: a baseline "Auto Match" and a more aggressive variant tuned
//! for the induction type. They are scored like catalog cams and flagged as
//! synthesized.

use uuid::Uuid;

use super::target::{IdlePreference, Usage};
use super::RecommendationRequest;
use crate::catalog::{BoostSuitability, CamCatalogRecord};

struct Variant {
    label: &'static str,
    duration_offset: f64,
    lsa_offset: f64,
    lift_offset: f64,
    note: &'static str,
}

const MATCH: Variant = Variant {
    label: "Auto Match",
    duration_offset: 0.0,
    lsa_offset: 0.0,
    lift_offset: 0.0,
    note: "Targets the stated rpm window.",
};

const AGGRESSIVE: Variant = Variant {
    label: "Auto Aggressive",
    duration_offset: 4.0,
    lsa_offset: -1.0,
    lift_offset: 0.015,
    note: "Adds duration and overlap for strip-focused combinations.",
};

const HIGH_BOOST: Variant = Variant {
    label: "Auto High-Boost",
    duration_offset: 2.0,
    lsa_offset: 1.0,
    lift_offset: 0.010,
    note: "Adds turbine-friendly overlap for high pressure ratios.",
};

/// Exhaust lift over intake lift for generated grinds
const EXHAUST_LIFT_BUMP: f64 = 0.015;

fn round_thousandths(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn kebab(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Two grinds sized for the request, or none if displacement or power is
/// missing.
pub fn synthesize_grinds(request: &RecommendationRequest) -> Vec<CamCatalogRecord> {
    let cid = request.displacement_cid;
    let hp = request.target_hp;
    if !(cid.is_finite() && cid > 0.0 && hp.is_finite() && hp > 0.0) {
        return Vec::new();
    }

    let boost = request.induction.is_boosted();
    let hp_per_cid = hp / cid;

    let usage_bias = match request.usage {
        Usage::Strip => 4.0,
        Usage::Truck => -5.0,
        Usage::Street => 0.0,
    };
    let base_duration = (214.0 + (hp_per_cid - 1.0) * 52.0 + usage_bias).clamp(204.0, 252.0);
    let spread = if boost { 6.0 } else { 8.0 };
    let rpm_target = if request.peak_rpm.is_finite() && request.peak_rpm > 0.0 {
        request.peak_rpm
    } else {
        (5200.0 + (hp_per_cid - 1.0) * 1200.0).round()
    };
    let lsa_base = if boost {
        113.0 + (hp_per_cid - 1.0) * 1.6
    } else {
        let choppy = if request.idle == IdlePreference::Choppy {
            1.5
        } else {
            0.0
        };
        110.0 + (hp_per_cid - 1.0) * 1.2 - choppy
    }
    .clamp(108.0, 118.0);
    let lift_ceiling = if boost { 0.65 } else { 0.72 };
    let lift_base = (0.44 + (hp_per_cid - 1.0) * 0.09).clamp(0.45, lift_ceiling);
    let boost_suitability = if boost {
        BoostSuitability::Yes
    } else {
        BoostSuitability::Either
    };
    let note_base = format!(
        "Auto-calculated from {} cid / {} hp goal.",
        cid.round(),
        hp.round()
    );

    let second = if boost { &HIGH_BOOST } else { &AGGRESSIVE };
    [&MATCH, second]
        .into_iter()
        .map(|variant| {
            let lift = lift_base + variant.lift_offset;
            CamCatalogRecord {
                id: format!("{}-{}", kebab(variant.label), Uuid::new_v4()),
                make: request.make.trim().to_string(),
                family: request.family.trim().to_string(),
                family_tags: Vec::new(),
                brand: String::new(),
                part_number: String::new(),
                name: Some(variant.label.to_string()),
                intake_duration: (base_duration + variant.duration_offset).round(),
                exhaust_duration: (base_duration + spread + variant.duration_offset).round(),
                lsa: (lsa_base + variant.lsa_offset).round().clamp(108.0, 118.0),
                intake_lift: round_thousandths(lift),
                exhaust_lift: round_thousandths(lift + EXHAUST_LIFT_BUMP),
                peak_hp_rpm: rpm_target,
                boost_suitability,
                rocker_ratio: None,
                notes: Some(format!("{} {}", note_base, variant.note)),
                source_url: None,
            }
        })
        .collect()
}
