use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{ats, temp_path, write_sample_csv};

#[test]
fn init_creates_a_config_file() {
    let cfg_path = temp_path("init_creates", "conf");

    ats()
        .args(["--config", &cfg_path, "init"])
        .assert()
        .success()
        .stdout(contains("Configuration created"));

    assert!(fs::metadata(&cfg_path).is_ok());

    // a second init must refuse to overwrite
    ats()
        .args(["--config", &cfg_path, "init"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn config_check_lists_missing_credentials() {
    let cfg_path = temp_path("config_check", "conf");

    ats()
        .args(["--config", &cfg_path, "init"])
        .assert()
        .success();

    ats()
        .args(["--config", &cfg_path, "config", "--check"])
        .assert()
        .success()
        .stdout(
            contains("target_url")
                .and(contains("contract_id"))
                .and(contains("login_id"))
                .and(contains("password")),
        );
}

#[test]
fn extract_prints_normalized_entries() {
    let csv = write_sample_csv("extract_prints");

    ats()
        .args(["extract", &csv, "--period", "2026-03"])
        .assert()
        .success()
        .stdout(contains("2026-03-02"))
        .stdout(contains("09:00"))
        .stdout(contains("18:00"))
        .stdout(contains("2026-03-03"))
        .stdout(contains("could not be interpreted"));
}

#[test]
fn extract_infers_period_from_document_context() {
    let csv = write_sample_csv("extract_infers");

    // no --period: the row-2 fragment carries year/month context
    ats()
        .args(["extract", &csv])
        .assert()
        .success()
        .stdout(contains("2026-03-01 .. 2026-03-31"));
}

#[test]
fn validate_reports_summary_counts() {
    let csv = write_sample_csv("validate_summary");

    ats()
        .args(["validate", &csv, "--period", "2026-03"])
        .assert()
        .success()
        .stdout(contains("Summary: 2 total"))
        .stdout(contains("warning")) // row-2 carries low confidence
        .stdout(contains("no blocking findings"));
}

#[test]
fn validate_json_is_machine_readable() {
    let csv = write_sample_csv("validate_json");

    let output = ats()
        .args(["validate", &csv, "--period", "2026-03", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value =
        serde_json::from_slice(&output).expect("validate --json must emit valid JSON");
    assert_eq!(parsed["summary"]["total"], 2);
    assert_eq!(parsed["batch"]["entries"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["unparsed"]["fragments"].as_array().unwrap().len(), 1);

    // every entry carries an explicit status, even before any submission
    for entry in parsed["batch"]["entries"].as_array().unwrap() {
        assert_eq!(entry["outcome"]["status"], "pending");
    }
}

#[test]
fn run_dry_run_submits_nothing_but_reports_everything() {
    let csv = write_sample_csv("dry_run");
    let cfg_path = temp_path("dry_run", "conf");

    ats()
        .args(["--config", &cfg_path, "init"])
        .assert()
        .success();

    ats()
        .args([
            "--config",
            &cfg_path,
            "run",
            &csv,
            "--period",
            "2026-03",
            "--dry-run",
            "--yes",
        ])
        .assert()
        .success()
        .stdout(contains("dry run"))
        .stdout(contains("Planned 2"))
        .stdout(contains("submitted"))
        .stdout(contains("run finished"));
}

#[test]
fn unsupported_source_extension_is_rejected() {
    let path = temp_path("unsupported", "xlsx");
    fs::write(&path, "not really a workbook").unwrap();

    ats()
        .args(["extract", &path])
        .assert()
        .failure()
        .stderr(contains("Unsupported source file"));
}

#[test]
fn json_source_round_trips_fragments() {
    let path = temp_path("json_source", "json");
    fs::write(
        &path,
        r#"[
            { "label": "row-1", "text": "2026-03-02" },
            { "label": "row-1", "text": "09:00 18:00", "confidence": "low" }
        ]"#,
    )
    .unwrap();

    ats()
        .args(["validate", &path, "--period", "2026-03"])
        .assert()
        .success()
        .stdout(contains("2026-03-02"))
        .stdout(contains("low recognition confidence").or(contains("warning")));
}
