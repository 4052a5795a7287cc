//! Train/test splitting, classification metrics, and report artifacts.
//!
//! Reports are written as CSV files so that runs can be compared with any
//! spreadsheet tool:
//!
//! - `{prefix}_classification_report.csv`: per-label precision, recall, F1
//!   and support, followed by accuracy and the macro and weighted averages
//! - `{prefix}_confusion_matrix.csv`: truth rows by predicted columns
//! - `{prefix}_summary_metrics.csv`: weighted precision, recall and F1
//! - `model_comparison.csv`: one row per classifier kind, best F1 first

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassifierKind, ClauseClassifier};
use crate::error::{AnalyzerError, Result};

/// Texts and labels divided into a training and a test part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainTestSplit {
    pub train_texts: Vec<String>,
    pub train_labels: Vec<String>,
    pub test_texts: Vec<String>,
    pub test_labels: Vec<String>,
}

/// Split a labelled dataset deterministically.
///
/// The split is stratified by label when every label has at least two
/// examples; then each label contributes `round(count * test_size)` test
/// examples, clamped so that it keeps at least one example on both sides.
/// Otherwise `round(n * test_size)` examples go to the test part, clamped
/// the same way. Test examples are spread evenly over the input order, and
/// both parts keep the input order.
pub fn train_test_split<S: AsRef<str>, L: AsRef<str>>(
    texts: &[S],
    labels: &[L],
    test_size: f64,
) -> Result<TrainTestSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(AnalyzerError::InvalidArgument(format!(
            "test_size must be between 0 and 1 (exclusive), got {test_size}"
        )));
    }
    if texts.len() != labels.len() {
        return Err(AnalyzerError::InvalidDataset(format!(
            "{} texts but {} labels",
            texts.len(),
            labels.len()
        )));
    }

    let mut by_label: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, label) in labels.iter().enumerate() {
        by_label.entry(label.as_ref()).or_default().push(index);
    }
    let stratified = by_label.values().all(|indices| indices.len() >= 2);

    let groups: Vec<Vec<usize>> = if stratified {
        by_label.into_values().collect()
    } else {
        vec![(0..texts.len()).collect()]
    };

    let mut test_indices = BTreeSet::new();
    for group in &groups {
        let n_test = test_count(group.len(), test_size);
        for j in 0..n_test {
            test_indices.insert(group[(j + 1) * group.len() / n_test - 1]);
        }
    }

    tracing::debug!(
        stratified,
        total = texts.len(),
        test = test_indices.len(),
        "Split dataset"
    );

    let mut split = TrainTestSplit::default();
    for (index, (text, label)) in texts.iter().zip(labels).enumerate() {
        let (text, label) = (text.as_ref().to_string(), label.as_ref().to_string());
        if test_indices.contains(&index) {
            split.test_texts.push(text);
            split.test_labels.push(label);
        } else {
            split.train_texts.push(text);
            split.train_labels.push(label);
        }
    }
    Ok(split)
}

fn test_count(n: usize, test_size: f64) -> usize {
    if n < 2 {
        return 0;
    }
    let wanted = (n as f64 * test_size).round() as usize;
    wanted.clamp(1, n - 1)
}

/// Precision, recall and F1 of one label (or an average of labels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Metrics for a single label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMetrics {
    pub label: String,
    pub scores: Scores,
    pub support: usize,
}

/// Per-label metrics with accuracy and averaged scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub labels: Vec<LabelMetrics>,
    pub accuracy: f64,
    pub macro_avg: Scores,
    pub weighted_avg: Scores,
    pub support: usize,
}

/// Weighted-average metrics of one evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub precision_weighted: f64,
    pub recall_weighted: f64,
    pub f1_weighted: f64,
}

impl From<&ClassificationReport> for SummaryMetrics {
    fn from(report: &ClassificationReport) -> Self {
        Self {
            precision_weighted: report.weighted_avg.precision,
            recall_weighted: report.weighted_avg.recall,
            f1_weighted: report.weighted_avg.f1_score,
        }
    }
}

/// One row of the model comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub model: ClassifierKind,
    pub precision_weighted: f64,
    pub recall_weighted: f64,
    pub f1_weighted: f64,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn sorted_labels<T: AsRef<str>, P: AsRef<str>>(truth: &[T], predicted: &[P]) -> Vec<String> {
    truth
        .iter()
        .map(|t| t.as_ref())
        .chain(predicted.iter().map(|p| p.as_ref()))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Compute per-label and averaged metrics. Divisions by zero yield 0.
pub fn classification_report<T: AsRef<str>, P: AsRef<str>>(
    truth: &[T],
    predicted: &[P],
) -> ClassificationReport {
    let labels = sorted_labels(truth, predicted);
    let total = truth.len().min(predicted.len());

    let mut rows = Vec::with_capacity(labels.len());
    let mut correct = 0;
    for label in &labels {
        let mut true_positives = 0;
        let mut predicted_count = 0;
        let mut support = 0;
        for (t, p) in truth.iter().zip(predicted) {
            let is_truth = t.as_ref() == label;
            let is_predicted = p.as_ref() == label;
            support += usize::from(is_truth);
            predicted_count += usize::from(is_predicted);
            true_positives += usize::from(is_truth && is_predicted);
        }
        correct += true_positives;

        let precision = ratio(true_positives, predicted_count);
        let recall = ratio(true_positives, support);
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        rows.push(LabelMetrics {
            label: label.clone(),
            scores: Scores {
                precision,
                recall,
                f1_score,
            },
            support,
        });
    }

    let average = |weight: &dyn Fn(&LabelMetrics) -> f64| -> Scores {
        let total_weight: f64 = rows.iter().map(weight).sum();
        if total_weight == 0.0 {
            return Scores::default();
        }
        let sum = |field: fn(&Scores) -> f64| {
            rows.iter().map(|r| field(&r.scores) * weight(r)).sum::<f64>() / total_weight
        };
        Scores {
            precision: sum(|s: &Scores| s.precision),
            recall: sum(|s: &Scores| s.recall),
            f1_score: sum(|s: &Scores| s.f1_score),
        }
    };
    let macro_avg = average(&|_| 1.0);
    let weighted_avg = average(&|r| r.support as f64);

    ClassificationReport {
        accuracy: ratio(correct, total),
        macro_avg,
        weighted_avg,
        support: total,
        labels: rows,
    }
}

/// Confusion matrix over the sorted union of true and predicted labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub labels: Vec<String>,
    /// `counts[truth][predicted]`
    pub counts: Vec<Vec<usize>>,
}

pub fn confusion_matrix<T: AsRef<str>, P: AsRef<str>>(
    truth: &[T],
    predicted: &[P],
) -> ConfusionMatrix {
    let labels = sorted_labels(truth, predicted);
    let index = |label: &str| labels.binary_search_by(|l| l.as_str().cmp(label)).ok();

    let mut counts = vec![vec![0; labels.len()]; labels.len()];
    for (t, p) in truth.iter().zip(predicted) {
        if let (Some(row), Some(col)) = (index(t.as_ref()), index(p.as_ref())) {
            counts[row][col] += 1;
        }
    }
    ConfusionMatrix { labels, counts }
}

#[derive(Serialize)]
struct ReportRow<'a> {
    label: &'a str,
    precision: Option<f64>,
    recall: Option<f64>,
    #[serde(rename = "f1-score")]
    f1_score: f64,
    support: usize,
}

impl<'a> ReportRow<'a> {
    fn scores(label: &'a str, scores: &Scores, support: usize) -> Self {
        Self {
            label,
            precision: Some(scores.precision),
            recall: Some(scores.recall),
            f1_score: scores.f1_score,
            support,
        }
    }
}

fn write_report(report: &ClassificationReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in &report.labels {
        writer.serialize(ReportRow::scores(&row.label, &row.scores, row.support))?;
    }
    writer.serialize(ReportRow {
        label: "accuracy",
        precision: None,
        recall: None,
        f1_score: report.accuracy,
        support: report.support,
    })?;
    writer.serialize(ReportRow::scores("macro avg", &report.macro_avg, report.support))?;
    writer.serialize(ReportRow::scores(
        "weighted avg",
        &report.weighted_avg,
        report.support,
    ))?;
    writer.flush()?;
    Ok(())
}

fn write_confusion_matrix(matrix: &ConfusionMatrix, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let header =
        std::iter::once("actual \\ predicted").chain(matrix.labels.iter().map(String::as_str));
    writer.write_record(header)?;
    for (label, row) in matrix.labels.iter().zip(&matrix.counts) {
        let mut record = vec![label.clone()];
        record.extend(row.iter().map(ToString::to_string));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_rows<T: Serialize>(rows: &[T], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Evaluate a classifier on labelled texts and write its report artifacts
/// to `output_dir`, returning the weighted-average metrics.
pub fn evaluate_classifier<S: AsRef<str>, L: AsRef<str>>(
    model: &ClauseClassifier,
    texts: &[S],
    labels: &[L],
    output_dir: &Path,
    prefix: &str,
) -> Result<SummaryMetrics> {
    fs::create_dir_all(output_dir)?;

    let predictions = model.predict(texts);
    let report = classification_report(labels, &predictions);
    let summary = SummaryMetrics::from(&report);

    write_report(
        &report,
        &output_dir.join(format!("{prefix}_classification_report.csv")),
    )?;
    write_confusion_matrix(
        &confusion_matrix(labels, &predictions),
        &output_dir.join(format!("{prefix}_confusion_matrix.csv")),
    )?;
    write_rows(
        &[summary],
        &output_dir.join(format!("{prefix}_summary_metrics.csv")),
    )?;

    tracing::info!(
        prefix,
        examples = texts.len(),
        f1_weighted = summary.f1_weighted,
        "Evaluated classifier"
    );
    Ok(summary)
}

/// Train every [`ClassifierKind`] on the training part, score it on the test
/// part, and write `model_comparison.csv` ranked by weighted F1.
pub fn compare_baseline_models(
    split: &TrainTestSplit,
    output_dir: &Path,
) -> Result<Vec<ModelComparison>> {
    let mut rows = Vec::new();
    for kind in ClassifierKind::ALL {
        let model = ClauseClassifier::train(kind, &split.train_texts, &split.train_labels)?;
        let predictions = model.predict(&split.test_texts);
        let summary = SummaryMetrics::from(&classification_report(
            &split.test_labels,
            &predictions,
        ));
        rows.push(ModelComparison {
            model: kind,
            precision_weighted: summary.precision_weighted,
            recall_weighted: summary.recall_weighted,
            f1_weighted: summary.f1_weighted,
        });
    }
    rows.sort_by(|a, b| b.f1_weighted.total_cmp(&a.f1_weighted));

    fs::create_dir_all(output_dir)?;
    write_rows(&rows, &output_dir.join("model_comparison.csv"))?;
    Ok(rows)
}
