//! Tests for cam recommendation

#[cfg(test)]
mod tests {
    use camspec_core::catalog::{BoostSuitability, CamCatalogRecord};
    use camspec_core::recommend::{
        cam_distance, match_percentage, recommend, synthesize_target, CandidateOrigin,
        IdlePreference, Induction, RecommendationOutcome, RecommendationRequest, Usage,
    };

    fn windsor_cam(id: &str, intake: f64, exhaust: f64, lsa: f64) -> CamCatalogRecord {
        CamCatalogRecord {
            id: id.to_string(),
            make: "Ford".to_string(),
            family: "SBF Windsor (221/260/289/302/351W)".to_string(),
            family_tags: Vec::new(),
            brand: "COMP".to_string(),
            part_number: format!("PN-{id}"),
            name: None,
            intake_duration: intake,
            exhaust_duration: exhaust,
            lsa,
            intake_lift: 0.52,
            exhaust_lift: 0.54,
            peak_hp_rpm: 6200.0,
            boost_suitability: BoostSuitability::Either,
            rocker_ratio: None,
            notes: None,
            source_url: None,
        }
    }

    fn catalog() -> Vec<CamCatalogRecord> {
        let mut boost = windsor_cam("boost", 220.0, 228.0, 114.0);
        boost.boost_suitability = BoostSuitability::Yes;
        let mut na_only = windsor_cam("na-only", 230.0, 238.0, 110.0);
        na_only.boost_suitability = BoostSuitability::No;
        let mut fe = windsor_cam("fe", 230.0, 236.0, 112.0);
        fe.family = "FE Big Block (332/352/360/390/406/427/428)".to_string();
        let mut chevy = windsor_cam("chevy", 224.0, 232.0, 112.0);
        chevy.make = "Chevy / GM".to_string();
        vec![
            windsor_cam("street", 224.0, 232.0, 112.0),
            boost,
            na_only,
            fe,
            chevy,
        ]
    }

    fn request(induction: Induction) -> RecommendationRequest {
        RecommendationRequest {
            make: "Ford".to_string(),
            family: "SBF Windsor".to_string(),
            displacement_cid: 347.0,
            target_hp: 420.0,
            peak_rpm: 6200.0,
            induction,
            usage: Usage::Street,
            idle: IdlePreference::Choppy,
            ..RecommendationRequest::default()
        }
    }

    #[test]
    fn test_identical_to_target_is_full_match() {
        let req = request(Induction::NaturallyAspirated);
        let target = synthesize_target(&req);
        let mut cam = windsor_cam(
            "exact",
            target.intake_duration,
            target.exhaust_duration,
            target.lsa,
        );
        cam.intake_lift = target.intake_lift;
        cam.exhaust_lift = target.exhaust_lift;
        cam.peak_hp_rpm = req.peak_rpm;

        let distance = cam_distance(&cam, &target, req.peak_rpm, req.induction, req.idle);
        assert_eq!(distance, 0.0);
        assert_eq!(match_percentage(distance), 100);
    }

    #[test]
    fn test_only_same_make_and_family_are_ranked() {
        let rec = recommend(&request(Induction::NaturallyAspirated), &catalog());
        assert_eq!(rec.outcome, RecommendationOutcome::Ranked);
        assert_eq!(rec.catalog_matches, 3);
        assert!(rec
            .candidates
            .iter()
            .all(|c| c.record.make == "Ford" && c.record.family.contains("Windsor")));
    }

    #[test]
    fn test_boost_excludes_na_only_cams() {
        let rec = recommend(&request(Induction::Boost), &catalog());
        assert_eq!(rec.catalog_matches, 2);
        assert!(rec
            .candidates
            .iter()
            .all(|c| c.record.boost_suitability != BoostSuitability::No));
    }

    #[test]
    fn test_candidates_sorted_by_distance() {
        let rec = recommend(&request(Induction::NaturallyAspirated), &catalog());
        assert!(rec
            .candidates
            .windows(2)
            .all(|w| w[0].distance <= w[1].distance));
        assert!(rec
            .candidates
            .windows(2)
            .all(|w| w[0].match_percent >= w[1].match_percent));
    }

    #[test]
    fn test_no_candidates_is_distinct_outcome() {
        let mut req = request(Induction::NaturallyAspirated);
        req.family = "Coyote".to_string();
        let rec = recommend(&req, &catalog());
        assert_eq!(rec.outcome, RecommendationOutcome::NoCandidates);
        assert!(rec.candidates.is_empty());
        assert!(rec.target.is_some());
    }

    #[test]
    fn test_empty_catalog_is_no_candidates() {
        let rec = recommend(&request(Induction::NaturallyAspirated), &[]);
        assert_eq!(rec.outcome, RecommendationOutcome::NoCandidates);
    }

    #[test]
    fn test_invalid_request_is_insufficient_data() {
        let mut req = request(Induction::NaturallyAspirated);
        req.target_hp = -5.0;
        req.peak_rpm = f64::NAN;
        let rec = recommend(&req, &catalog());
        match rec.outcome {
            RecommendationOutcome::InsufficientData { problems } => {
                assert_eq!(problems.len(), 2);
            }
            other => panic!("expected insufficient data, got {other:?}"),
        }
        assert!(rec.target.is_none());
    }

    #[test]
    fn test_auto_grinds_fill_empty_result() {
        let mut req = request(Induction::Boost);
        req.family = "Coyote".to_string();
        req.fill_with_auto_grinds = true;
        let rec = recommend(&req, &catalog());

        assert_eq!(rec.outcome, RecommendationOutcome::Ranked);
        assert_eq!(rec.catalog_matches, 0);
        assert_eq!(rec.candidates.len(), 2);
        assert!(rec
            .candidates
            .iter()
            .all(|c| c.origin == CandidateOrigin::Synthesized));
        let names: Vec<&str> = rec
            .candidates
            .iter()
            .filter_map(|c| c.record.name.as_deref())
            .collect();
        assert!(names.contains(&"Auto Match"));
        assert!(names.contains(&"Auto High-Boost"));
    }

    #[test]
    fn test_high_rpm_warns_but_ranks() {
        let mut req = request(Induction::NaturallyAspirated);
        req.peak_rpm = 9800.0;
        let rec = recommend(&req, &catalog());
        assert_eq!(rec.warnings.len(), 1);
        assert!(rec.is_ranked());
    }

    #[test]
    fn test_request_from_partial_json() {
        let req: RecommendationRequest = serde_json::from_str(
            r#"{ "make": "Ford", "family": "SBF Windsor", "displacement_cid": 302,
                 "target_hp": 350, "peak_rpm": 5800, "induction": "boost", "idle": "smooth" }"#,
        )
        .unwrap();
        assert_eq!(req.induction, Induction::Boost);
        assert_eq!(req.idle, IdlePreference::Smooth);
        assert_eq!(req.usage, Usage::Street);
        assert_eq!(req.limit, 4);
        assert!(req.is_valid());
    }
}
