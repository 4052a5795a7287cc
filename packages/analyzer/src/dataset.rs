//! CSV dataset loading for supervised clause classification.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// Accepted names for the clause text column, in priority order.
pub const TEXT_COLUMN_CANDIDATES: &[&str] = &["text", "clause", "sentence", "content"];

/// Accepted names for the label column, in priority order.
pub const LABEL_COLUMN_CANDIDATES: &[&str] = &["label", "category", "clause_type", "type"];

/// One labelled training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledClause {
    pub text: String,
    pub label: String,
}

/// Load a training dataset from a CSV file.
pub fn load_training_dataset(csv_path: &Path) -> Result<Vec<LabeledClause>> {
    let file = std::fs::File::open(csv_path)?;
    let rows = load_training_dataset_from_reader(file)?;
    tracing::debug!(path = %csv_path.display(), rows = rows.len(), "Loaded training dataset");
    Ok(rows)
}

/// Load a training dataset from any CSV source with a header row.
///
/// The first matching text and label columns are used. Rows with a blank
/// text or label are dropped, and all values are trimmed.
pub fn load_training_dataset_from_reader<R: Read>(source: R) -> Result<Vec<LabeledClause>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let text_index = first_existing_column(&headers, TEXT_COLUMN_CANDIDATES)?;
    let label_index = first_existing_column(&headers, LABEL_COLUMN_CANDIDATES)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let text = record.get(text_index).map(str::trim).unwrap_or_default();
        let label = record.get(label_index).map(str::trim).unwrap_or_default();
        if text.is_empty() || label.is_empty() {
            continue;
        }
        rows.push(LabeledClause {
            text: text.to_string(),
            label: label.to_string(),
        });
    }

    if rows.is_empty() {
        return Err(AnalyzerError::DatasetSchema(
            "No valid rows found after cleaning text and label columns.".to_string(),
        ));
    }

    Ok(rows)
}

/// Index of the first candidate column present in the header.
fn first_existing_column(headers: &[String], candidates: &[&str]) -> Result<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|h| h == candidate))
        .ok_or_else(|| {
            AnalyzerError::DatasetSchema(format!(
                "None of the expected columns found: {candidates:?}"
            ))
        })
}

/// Split rows into parallel text and label vectors.
#[must_use]
pub fn into_columns(rows: Vec<LabeledClause>) -> (Vec<String>, Vec<String>) {
    rows.into_iter().map(|row| (row.text, row.label)).unzip()
}
