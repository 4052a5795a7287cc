//! Per-clause risk review of a contract.
//!
//! Combines segmentation, clause classification and the risk table into one
//! row per clause, and provides the filtering and export used by the CLI.

use std::collections::BTreeSet;

use contract_risk_segmentation::{segment_document, SegmentOptions};
use serde::{Deserialize, Serialize};

use crate::classifier::ClauseClassifier;
use crate::error::Result;
use crate::risk::{map_clause_type_to_risk, Severity};

/// Risk assessment of one clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseRisk {
    /// Sequential identifier: "C001", "C002", ...
    pub clause_id: String,
    pub clause_text: String,
    pub predicted_type: String,
    pub severity: Severity,
    pub risk_score: u8,
}

/// Identifier for the clause at zero-based `index`.
#[must_use]
pub fn clause_id(index: usize) -> String {
    format!("C{:03}", index + 1)
}

/// Segment `text`, classify every clause and attach its risk profile.
///
/// Text without clauses yields no rows.
pub fn analyze_text(
    text: &str,
    classifier: &ClauseClassifier,
    options: &SegmentOptions,
) -> Vec<ClauseRisk> {
    let segmentation = segment_document(text, options);
    let predicted = classifier.predict(&segmentation.clauses);

    let rows: Vec<ClauseRisk> = segmentation
        .clauses
        .into_iter()
        .zip(predicted)
        .enumerate()
        .map(|(index, (clause_text, predicted_type))| {
            let risk = map_clause_type_to_risk(&predicted_type);
            ClauseRisk {
                clause_id: clause_id(index),
                clause_text,
                predicted_type,
                severity: risk.severity,
                risk_score: risk.score,
            }
        })
        .collect();

    tracing::info!(
        clauses = rows.len(),
        high = rows.iter().filter(|r| r.severity == Severity::High).count(),
        path = ?segmentation.path,
        "Analyzed contract"
    );
    rows
}

/// Row filter on severity and predicted clause type.
///
/// An empty set does not restrict its column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub severities: BTreeSet<Severity>,
    pub clause_types: BTreeSet<String>,
}

impl ReviewFilter {
    #[must_use]
    pub fn matches(&self, row: &ClauseRisk) -> bool {
        (self.severities.is_empty() || self.severities.contains(&row.severity))
            && (self.clause_types.is_empty() || self.clause_types.contains(&row.predicted_type))
    }

    #[must_use]
    pub fn apply(&self, rows: &[ClauseRisk]) -> Vec<ClauseRisk> {
        rows.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}

/// Rows worth highlighting: High and Medium severity.
#[must_use]
pub fn highlighted(rows: &[ClauseRisk]) -> Vec<&ClauseRisk> {
    rows.iter()
        .filter(|row| matches!(row.severity, Severity::High | Severity::Medium))
        .collect()
}

/// Export rows as CSV with a header row.
pub fn to_csv(rows: &[ClauseRisk]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer.write_record([
            "clause_id",
            "clause_text",
            "predicted_type",
            "severity",
            "risk_score",
        ])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Export rows as a pretty-printed JSON array of records.
pub fn to_json(rows: &[ClauseRisk]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
