//! End-to-end tests for training, evaluation and contract review.
//!
//! Uses a small labelled dataset covering every clause type in the risk
//! table and a short services agreement built from the same vocabulary.

use std::fs;
use std::path::{Path, PathBuf};

use contract_risk_analyzer::dataset::into_columns;
use contract_risk_analyzer::{
    analyze_text, compare_baseline_models, evaluate_classifier, extract_text_from_path,
    highlighted, load_model, load_training_dataset, save_model, train_test_split,
    ClassifierKind, ClauseClassifier, Severity,
};
use contract_risk_segmentation::SegmentOptions;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn training_columns() -> (Vec<String>, Vec<String>) {
    into_columns(load_training_dataset(&fixture("training.csv")).unwrap())
}

#[test]
fn test_load_fixture_dataset() {
    let (texts, labels) = training_columns();
    assert_eq!(texts.len(), 32);
    assert_eq!(labels.iter().filter(|l| *l == "Indemnity").count(), 4);
}

#[test]
fn test_split_train_and_evaluate() {
    let (texts, labels) = training_columns();
    let split = train_test_split(&texts, &labels, 0.25).unwrap();
    assert_eq!(split.test_texts.len(), 8);
    assert_eq!(split.train_texts.len(), 24);

    let model = ClauseClassifier::train(
        ClassifierKind::LogisticRegression,
        &split.train_texts,
        &split.train_labels,
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let reports = dir.path().join("reports");
    let metrics =
        evaluate_classifier(&model, &split.test_texts, &split.test_labels, &reports, "logreg")
            .unwrap();

    for value in [
        metrics.precision_weighted,
        metrics.recall_weighted,
        metrics.f1_weighted,
    ] {
        assert!((0.0..=1.0).contains(&value));
    }
    assert!(reports.join("logreg_classification_report.csv").exists());
    assert!(reports.join("logreg_confusion_matrix.csv").exists());
    assert!(reports.join("logreg_summary_metrics.csv").exists());

    let matrix = fs::read_to_string(reports.join("logreg_confusion_matrix.csv")).unwrap();
    // Header plus one row per label
    assert!(matrix.lines().count() >= 9);
}

#[test]
fn test_compare_baseline_models() {
    let (texts, labels) = training_columns();
    let split = train_test_split(&texts, &labels, 0.25).unwrap();
    let dir = TempDir::new().unwrap();

    let rows = compare_baseline_models(&split, dir.path()).unwrap();
    assert_eq!(rows.len(), ClassifierKind::ALL.len());
    assert!(rows.windows(2).all(|w| w[0].f1_weighted >= w[1].f1_weighted));

    let csv = fs::read_to_string(dir.path().join("model_comparison.csv")).unwrap();
    assert!(csv.starts_with("model,precision_weighted,recall_weighted,f1_weighted\n"));
    // Header plus one row per classifier kind
    assert_eq!(csv.lines().count(), ClassifierKind::ALL.len() + 1);
}

#[test]
fn test_review_service_agreement() {
    let (texts, labels) = training_columns();
    let model =
        ClauseClassifier::train(ClassifierKind::LogisticRegression, &texts, &labels).unwrap();

    let text = extract_text_from_path(&fixture("service_agreement.txt")).unwrap();
    let rows = analyze_text(&text, &model, &SegmentOptions::default());

    let ids: Vec<&str> = rows.iter().map(|r| r.clause_id.as_str()).collect();
    assert_eq!(ids, vec!["C001", "C002", "C003", "C004", "C005", "C006"]);
    assert!(rows[0].clause_text.starts_with("MASTER SERVICES AGREEMENT 1 Payment"));

    assert_eq!(rows[1].predicted_type, "Indemnity");
    assert_eq!(rows[1].severity, Severity::High);
    assert_eq!(rows[1].risk_score, 90);

    assert_eq!(rows[5].predicted_type, "Governing Law");
    assert_eq!(rows[5].severity, Severity::Low);
    assert!(highlighted(&rows).iter().all(|r| r.clause_id != "C006"));
}

#[test]
fn test_saved_model_predicts_identically() {
    let (texts, labels) = training_columns();
    let model = ClauseClassifier::train(ClassifierKind::NearestCentroid, &texts, &labels).unwrap();

    let dir = TempDir::new().unwrap();
    let path = save_model(&model, &dir.path().join("models").join("model.json")).unwrap();
    let loaded = load_model(&path).unwrap();

    assert_eq!(loaded.predict(&texts), model.predict(&texts));
}
