//! Camshaft Recommendation
//!
//! Turns a power goal into ranked cam suggestions:
//! - Target spec synthesis from hp/cid, rpm, usage and idle preference
//! - Eligibility filtering by make, family and boost suitability
//! - Weighted distance scoring and match percentages
//! - Optional synthesized grinds when the catalog runs short

mod auto_grind;
mod family;
mod scoring;
mod target;

pub use auto_grind::synthesize_grinds;
pub use family::{families_overlap, family_tokens, strip_parenthetical};
pub use scoring::{
    cam_distance, is_eligible, match_percentage, score_candidates, CandidateOrigin,
    ScoredCandidate, FALLBACK_LSA,
};
pub use target::{synthesize_target, IdlePreference, Induction, TargetSpec, Usage};

use serde::{Deserialize, Serialize};

use crate::catalog::{CamCatalog, CamCatalogRecord, CatalogError, CatalogQuery};

/// Candidates returned when the request does not say
pub const DEFAULT_LIMIT: usize = 4;

/// Peak rpm above this draws a warning
pub const HIGH_RPM_WARNING: f64 = 9500.0;

/// Peak rpm below this draws a warning
pub const LOW_RPM_WARNING: f64 = 3000.0;

/// What the user wants from the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationRequest {
    pub make: String,
    pub family: String,
    pub displacement_cid: f64,
    /// Target flywheel horsepower
    pub target_hp: f64,
    pub peak_rpm: f64,
    pub induction: Induction,
    pub usage: Usage,
    pub idle: IdlePreference,
    /// Most candidates to return
    pub limit: usize,
    /// Pad short results with synthesized grinds
    pub fill_with_auto_grinds: bool,
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            make: String::new(),
            family: String::new(),
            displacement_cid: 0.0,
            target_hp: 0.0,
            peak_rpm: 0.0,
            induction: Induction::default(),
            usage: Usage::default(),
            idle: IdlePreference::default(),
            limit: DEFAULT_LIMIT,
            fill_with_auto_grinds: false,
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl RecommendationRequest {
    /// Reasons the request cannot be scored; empty when it can
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.make.trim().is_empty() {
            problems.push("engine make is required".to_string());
        }
        if self.family.trim().is_empty() {
            problems.push("engine family is required".to_string());
        }
        if !positive(self.displacement_cid) {
            problems.push("displacement must be greater than zero".to_string());
        }
        if !positive(self.target_hp) {
            problems.push("target horsepower must be greater than zero".to_string());
        }
        if !positive(self.peak_rpm) {
            problems.push("peak rpm must be greater than zero".to_string());
        }
        problems
    }

    pub fn is_valid(&self) -> bool {
        self.problems().is_empty()
    }

    /// Unusual but scorable inputs
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.peak_rpm > HIGH_RPM_WARNING {
            warnings.push(format!(
                "peak rpm {} is above {}; check valvetrain limits",
                self.peak_rpm, HIGH_RPM_WARNING
            ));
        } else if positive(self.peak_rpm) && self.peak_rpm < LOW_RPM_WARNING {
            warnings.push(format!(
                "peak rpm {} is below {}; results favor torque cams",
                self.peak_rpm, LOW_RPM_WARNING
            ));
        }
        warnings
    }

    pub fn query(&self) -> CatalogQuery {
        CatalogQuery::new(self.make.as_str(), self.family.as_str())
    }
}

/// How a recommendation ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    /// At least one candidate was ranked
    Ranked,
    /// The request was valid but nothing matched
    NoCandidates,
    /// The request could not be scored
    InsufficientData { problems: Vec<String> },
}

/// Result of the recommendation entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Absent when the request was invalid
    pub target: Option<TargetSpec>,
    /// Best first
    pub candidates: Vec<ScoredCandidate>,
    pub outcome: RecommendationOutcome,
    pub warnings: Vec<String>,
    /// Eligible catalog cams before truncation
    pub catalog_matches: usize,
}

impl Recommendation {
    fn insufficient(problems: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            target: None,
            candidates: Vec::new(),
            outcome: RecommendationOutcome::InsufficientData { problems },
            warnings,
            catalog_matches: 0,
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.outcome == RecommendationOutcome::Ranked
    }

    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.candidates.first()
    }
}

/// Rank catalog cams against the request.
///
/// Ineligible cams (wrong make, non-overlapping family, NA-only under boost)
/// are skipped. With `fill_with_auto_grinds`, synthesized grinds top the list
/// up to the limit before the final sort.
pub fn recommend(request: &RecommendationRequest, cams: &[CamCatalogRecord]) -> Recommendation {
    let warnings = request.warnings();
    let problems = request.problems();
    if !problems.is_empty() {
        tracing::debug!(?problems, "recommendation skipped");
        return Recommendation::insufficient(problems, warnings);
    }

    let target = synthesize_target(request);
    let limit = request.limit.max(1);

    let eligible: Vec<CamCatalogRecord> = cams
        .iter()
        .filter(|cam| is_eligible(cam, &request.make, &request.family, request.induction))
        .cloned()
        .collect();
    let catalog_matches = eligible.len();

    let mut pool: Vec<(CamCatalogRecord, CandidateOrigin)> = eligible
        .into_iter()
        .map(|cam| (cam, CandidateOrigin::Catalog))
        .collect();
    if request.fill_with_auto_grinds && pool.len() < limit {
        let missing = limit - pool.len();
        pool.extend(
            synthesize_grinds(request)
                .into_iter()
                .take(missing)
                .map(|cam| (cam, CandidateOrigin::Synthesized)),
        );
    }

    let mut candidates = score_candidates(
        pool,
        &target,
        request.peak_rpm,
        request.induction,
        request.idle,
    );
    candidates.truncate(limit);

    let outcome = if candidates.is_empty() {
        RecommendationOutcome::NoCandidates
    } else {
        RecommendationOutcome::Ranked
    };

    tracing::debug!(
        make = %request.make,
        family = %request.family,
        catalog_matches,
        returned = candidates.len(),
        best = ?candidates.first().map(|c| c.distance),
        "recommendation ranked"
    );

    Recommendation {
        target: Some(target),
        candidates,
        outcome,
        warnings,
        catalog_matches,
    }
}

/// Query the catalog for the request's make and family, then rank the
/// result with [`recommend`]. Invalid requests never reach the catalog.
pub async fn recommend_from_catalog<C: CamCatalog>(
    catalog: &C,
    request: &RecommendationRequest,
) -> Result<Recommendation, CatalogError> {
    let problems = request.problems();
    if !problems.is_empty() {
        return Ok(Recommendation::insufficient(problems, request.warnings()));
    }
    let cams = catalog.search_cams(&request.query()).await?;
    Ok(recommend(request, &cams))
}
