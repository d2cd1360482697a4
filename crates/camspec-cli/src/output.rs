//! Plain-text rendering of reports and recommendations.

use camspec_core::performance::PerformanceReport;
use camspec_core::recommend::{Recommendation, RecommendationOutcome};

fn print_issues(report: &PerformanceReport) {
    if !report.is_complete() {
        println!("Insufficient data:");
        for issue in &report.issues {
            println!("  - {issue}");
        }
    }
}

pub fn print_report(report: &PerformanceReport) {
    print_issues(report);
    println!("Displacement:  {:.1} cid", report.displacement_cid);
    println!(
        "Compression:   {:.2}:1 static, {:.2}:1 dynamic, {:.2}:1 effective",
        report.static_cr, report.dynamic_cr, report.effective_cr
    );
    println!("Peak power:    {:.1} hp @ {:.0} rpm", report.peak_hp, report.peak_hp_rpm);
    println!("Peak torque:   {:.1} lb-ft", report.peak_torque);
    println!();
    println!("{:>6}  {:>7}  {:>7}", "rpm", "hp", "lb-ft");
    for point in &report.curve {
        println!("{:>6.0}  {:>7.1}  {:>7.1}", point.rpm, point.hp, point.torque);
    }
}

pub fn print_metric_report(report: &PerformanceReport) {
    print_issues(report);
    let metric = report.to_metric();
    println!("Displacement:  {:.2} L", metric.displacement_liters);
    println!(
        "Compression:   {:.2}:1 static, {:.2}:1 dynamic, {:.2}:1 effective",
        report.static_cr, report.dynamic_cr, report.effective_cr
    );
    println!("Peak power:    {:.1} kW @ {:.0} rpm", metric.peak_kw, metric.peak_hp_rpm);
    println!("Peak torque:   {:.1} N-m", metric.peak_torque_nm);
    println!();
    println!("{:>6}  {:>7}  {:>7}", "rpm", "kW", "N-m");
    for point in &metric.curve {
        println!("{:>6.0}  {:>7.1}  {:>7.1}", point.rpm, point.kw, point.torque_nm);
    }
}

pub fn print_recommendation(recommendation: &Recommendation) {
    for warning in &recommendation.warnings {
        println!("Warning: {warning}");
    }

    match &recommendation.outcome {
        RecommendationOutcome::InsufficientData { problems } => {
            println!("Cannot recommend a cam:");
            for problem in problems {
                println!("  - {problem}");
            }
            return;
        }
        RecommendationOutcome::NoCandidates => {
            println!("No catalog cams match this engine.");
        }
        RecommendationOutcome::Ranked => {}
    }

    if let Some(target) = &recommendation.target {
        println!(
            "Target: {:.0}/{:.0} @ {:.1} LSA, {:.3}/{:.3} lift, {:.0}-{:.0} rpm ({:.2} hp/cid)",
            target.intake_duration,
            target.exhaust_duration,
            target.lsa,
            target.intake_lift,
            target.exhaust_lift,
            target.rpm_band_low,
            target.rpm_band_high,
            target.hp_per_cid
        );
    }

    for (rank, candidate) in recommendation.candidates.iter().enumerate() {
        let cam = &candidate.record;
        let origin = if candidate.is_synthesized() {
            " [auto]"
        } else {
            ""
        };
        println!(
            "{}. {}{}  {:.0}/{:.0} @ {:.1}  {:.3}/{:.3}  {}% match (boost: {})",
            rank + 1,
            cam.label(),
            origin,
            cam.intake_duration,
            cam.exhaust_duration,
            cam.lsa,
            cam.intake_lift,
            cam.exhaust_lift,
            candidate.match_percent,
            cam.boost_suitability
        );
        if let Some(notes) = &cam.notes {
            println!("   {notes}");
        }
    }
}
