use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{tempdir, TempDir};

const CATALOG: &str = r#"{
    "ok": true,
    "cams": [
        { "make": "Ford", "family": "SBF Windsor (221/260/289/302/351W)", "brand": "COMP Cams",
          "pn": "35-518-8", "cam_name": "XE274HR", "dur_int_050": 230, "dur_exh_050": 236,
          "lsa": 110, "lift_int": 0.579, "lift_exh": 0.574, "peak_hp_rpm": 6200 },
        { "make": "Ford", "family": "SBF Windsor", "brand": "Lunati", "pn": "L-1",
          "dur_int_050": 218, "dur_exh_050": 226, "lsa": 114, "boost_ok": "yes",
          "notes": "Turbo-friendly overlap." },
        { "make": "Chevy / GM", "family": "SBC Gen I", "brand": "Lunati", "pn": "L-2",
          "dur_int_050": 224, "dur_exh_050": 230 }
    ],
    "heads": []
}"#;

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("camspec");
    cmd.env("RUST_LOG", "error");
    cmd
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run camspec");
    assert!(output.status.success(), "camspec failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn recommend_cmd(catalog: &Path) -> Command {
    let mut cmd = cli();
    cmd.arg("recommend")
        .arg("--catalog")
        .arg(catalog)
        .args(["--make", "Ford", "--family", "SBF Windsor"])
        .args(["--peak-rpm", "6200"]);
    cmd
}

#[test]
fn estimate_reference_engine_prints_summary() {
    cli()
        .arg("estimate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Peak power:"))
        .stdout(predicate::str::contains("hp @ 6500 rpm"))
        .stdout(predicate::str::contains("static"));
}

#[test]
fn estimate_json_has_full_curve() {
    let json = stdout_json(cli().args(["estimate", "--json"]));
    assert_eq!(json["status"], "complete");
    assert_eq!(json["curve"].as_array().map(Vec::len), Some(21));
    assert!(json["peak_hp"].as_f64().unwrap() > 0.0);
}

#[test]
fn estimate_merges_partial_input_and_flags() {
    let dir = tempdir().unwrap();
    let input = write_file(
        &dir,
        "inputs.json",
        r#"{ "tune": { "sweep": { "start": 3000, "end": 6000, "step": 500 } } }"#,
    );
    let json = stdout_json(
        cli()
            .args(["estimate", "--json", "--fuel", "e85", "--boost", "10"])
            .arg("--input")
            .arg(&input),
    );
    assert_eq!(json["curve"].as_array().map(Vec::len), Some(7));
    assert!(json["corrections"]["e85"].as_f64().unwrap() > 1.1);
    assert!(json["effective_cr"].as_f64().unwrap() > json["dynamic_cr"].as_f64().unwrap());
}

#[test]
fn estimate_metric_output() {
    cli()
        .args(["estimate", "--metric"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kW @"))
        .stdout(predicate::str::contains("N-m"));
}

#[test]
fn estimate_rejects_unknown_fuel() {
    cli()
        .args(["estimate", "--fuel", "diesel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown fuel type"));
}

#[test]
fn estimate_reports_unreadable_input() {
    cli()
        .args(["estimate", "--input", "/nonexistent/inputs.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read inputs"));
}

#[test]
fn recommend_lists_matching_cams() {
    let dir = tempdir().unwrap();
    let catalog = write_file(&dir, "catalog.json", CATALOG);
    recommend_cmd(&catalog)
        .args(["--cid", "347", "--hp", "420"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target:"))
        .stdout(predicate::str::contains("% match"))
        .stdout(predicate::str::contains("XE274HR"))
        .stdout(predicate::str::contains("L-2").not());
}

#[test]
fn recommend_json_with_metric_goal() {
    let dir = tempdir().unwrap();
    let catalog = write_file(&dir, "catalog.json", CATALOG);
    let json = stdout_json(
        recommend_cmd(&catalog)
            .args(["--liters", "5.0", "--kw", "300", "--induction", "boost", "--json"]),
    );
    assert_eq!(json["outcome"]["kind"], "ranked");
    assert_eq!(json["catalog_matches"], 1);
    assert_eq!(json["candidates"][0]["record"]["part_number"], "L-1");
}

#[test]
fn recommend_auto_fill_for_unknown_family() {
    let dir = tempdir().unwrap();
    let catalog = write_file(&dir, "catalog.json", CATALOG);
    cli()
        .arg("recommend")
        .arg("--catalog")
        .arg(&catalog)
        .args(["--make", "Ford", "--family", "Coyote", "--cid", "302"])
        .args(["--hp", "450", "--peak-rpm", "7000", "--auto-fill"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Auto Match [auto]"));
}

#[test]
fn recommend_without_matches_says_so() {
    let dir = tempdir().unwrap();
    let catalog = write_file(&dir, "catalog.json", CATALOG);
    cli()
        .arg("recommend")
        .arg("--catalog")
        .arg(&catalog)
        .args(["--make", "Mopar", "--family", "Hemi", "--cid", "392"])
        .args(["--hp", "500", "--peak-rpm", "6000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No catalog cams match"));
}

#[test]
fn recommend_requires_displacement() {
    let dir = tempdir().unwrap();
    let catalog = write_file(&dir, "catalog.json", CATALOG);
    recommend_cmd(&catalog)
        .args(["--hp", "420"])
        .assert()
        .failure();
}

#[test]
fn recommend_rejects_both_cid_and_liters() {
    let dir = tempdir().unwrap();
    let catalog = write_file(&dir, "catalog.json", CATALOG);
    recommend_cmd(&catalog)
        .args(["--cid", "347", "--liters", "5.7", "--hp", "420"])
        .assert()
        .failure();
}

#[test]
fn recommend_reports_missing_catalog() {
    cli()
        .args(["recommend", "--catalog", "/nonexistent/catalog.json"])
        .args(["--make", "Ford", "--family", "SBF Windsor"])
        .args(["--cid", "347", "--hp", "420", "--peak-rpm", "6200"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load catalog"));
}
