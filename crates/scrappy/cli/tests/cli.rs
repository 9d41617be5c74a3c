use assert_cmd::Command;
use predicates::prelude::*;

fn catalog() -> String {
    format!("{}/../../../data/thermaloop.json", env!("CARGO_MANIFEST_DIR"))
}

fn scrappy() -> Command {
    let mut cmd = Command::cargo_bin("scrappy").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("SCRAPPY_CONFIG")
        .arg("--catalog")
        .arg(catalog());
    cmd
}

#[test]
fn lists_ideas() {
    scrappy()
        .arg("ideas")
        .assert()
        .success()
        .stdout(predicate::str::contains("home_kit"))
        .stdout(predicate::str::contains("landlord_service"));
}

#[test]
fn idea_json_hides_risk() {
    scrappy()
        .args(["--output", "json", "ideas"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hidden_risk").not());
}

#[test]
fn seeded_play_is_reproducible() {
    let run = || {
        let out = scrappy()
            .args(["--output", "json", "play", "--idea", "home_kit", "--seed", "42"])
            .output()
            .unwrap();
        assert!(out.status.success());
        let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        (report["rounds"].clone(), report["scorecard"].clone())
    };
    let first = run();
    let second = run();
    assert_eq!(first, second);
    let total = first.1["total"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&total));
}

#[test]
fn text_report_shows_scorecard() {
    scrappy()
        .args(["play", "--idea", "installer_system", "--seed", "3", "--grade-statuses"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Risk Prioritization"))
        .stdout(predicate::str::contains("Evidence Alignment"))
        .stdout(predicate::str::contains("Total:"));
}

#[test]
fn unknown_idea_fails() {
    scrappy()
        .args(["play", "--idea", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn bad_ranking_fails() {
    scrappy()
        .args(["play", "--idea", "home_kit", "--ranking", "A1,A2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid ranking"));
}

#[test]
fn example_config_file_loads() {
    let config = format!(
        "{}/../../../data/scrappy.example.toml",
        env!("CARGO_MANIFEST_DIR")
    );
    scrappy()
        .args(["--config", config.as_str(), "--output", "json", "play"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"seed\": 42"))
        .stdout(predicate::str::contains("\"total_budget\": 30"));
}
