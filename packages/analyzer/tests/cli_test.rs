//! Command-line tests for the `contract-risk` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn segment_prints_numbered_clauses() {
    let mut cmd = cargo_bin_cmd!("contract-risk");
    cmd.arg("segment").arg(fixture("service_agreement.txt"));

    cmd.assert().success().stdout(
        predicate::str::contains("[1]")
            .and(predicate::str::contains("[6]"))
            .and(predicate::str::contains("structural"))
            .and(predicate::str::contains("[7]").not()),
    );
}

#[test]
fn segment_rejects_unsupported_file_type() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contract.docx");
    fs::write(&path, "1 Some clause text that is long enough.").unwrap();

    let mut cmd = cargo_bin_cmd!("contract-risk");
    cmd.arg("segment").arg(&path);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Unsupported file type: '.docx'"));
}

#[test]
fn segment_rejects_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").unwrap();

    let mut cmd = cargo_bin_cmd!("contract-risk");
    cmd.arg("segment").arg(&path);

    cmd.assert().failure().stderr(predicate::str::contains(
        "Error: No text could be extracted from the document.",
    ));
}

#[test]
fn train_then_analyze_json() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model.json");

    let mut train = cargo_bin_cmd!("contract-risk");
    train
        .arg("train")
        .arg("--csv")
        .arg(fixture("training.csv"))
        .arg("--model-out")
        .arg(&model_path);
    train
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to:"));
    assert!(model_path.exists());

    let output = dir.path().join("review.json");
    let mut analyze = cargo_bin_cmd!("contract-risk");
    analyze
        .arg("analyze")
        .arg(fixture("service_agreement.txt"))
        .arg("--model-path")
        .arg(&model_path)
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&output);
    analyze.assert().success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["clause_id"], "C001");
}

#[test]
fn analyze_trains_missing_model_and_filters_csv() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("nested").join("model.json");

    let mut cmd = cargo_bin_cmd!("contract-risk");
    cmd.env("CONTRACT_RISK_TRAIN_CSV", fixture("training.csv"))
        .arg("analyze")
        .arg(fixture("service_agreement.txt"))
        .arg("--model-path")
        .arg(&model_path)
        .arg("--severity")
        .arg("low")
        .arg("--format")
        .arg("csv");

    cmd.assert().success().stdout(
        predicate::str::starts_with("clause_id,clause_text,predicted_type,severity,risk_score\n")
            .and(predicate::str::contains(",High,").not()),
    );
    assert!(model_path.exists());
}

#[test]
fn eval_writes_reports() {
    let dir = TempDir::new().unwrap();
    let model_path = dir.path().join("model.json");
    let reports = dir.path().join("reports");

    cargo_bin_cmd!("contract-risk")
        .arg("train")
        .arg("--csv")
        .arg(fixture("training.csv"))
        .arg("--model-out")
        .arg(&model_path)
        .assert()
        .success();

    let mut cmd = cargo_bin_cmd!("contract-risk");
    cmd.arg("eval")
        .arg("--csv")
        .arg(fixture("training.csv"))
        .arg("--model-path")
        .arg(&model_path)
        .arg("--reports-dir")
        .arg(&reports)
        .arg("--test-size")
        .arg("0.25");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Weighted F1:"));
    assert!(reports.join("logreg_summary_metrics.csv").exists());
    assert!(reports.join("model_comparison.csv").exists());
}

#[test]
fn eval_rejects_invalid_test_size() {
    let mut cmd = cargo_bin_cmd!("contract-risk");
    cmd.arg("eval")
        .arg("--csv")
        .arg(fixture("training.csv"))
        .arg("--test-size")
        .arg("1.5");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("test_size"));
}
