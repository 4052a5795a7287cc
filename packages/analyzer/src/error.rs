//! Error types for the analyzer.
//!
//! Document errors are a closed set of variants so that the CLI can turn
//! each of them into an actionable message and stop processing the request.

use thiserror::Error;

/// Main error type for the analyzer library.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// File extension is not one of the supported document types.
    #[error("Unsupported file type: '{extension}'. Expected .txt or .pdf")]
    UnsupportedFileType { extension: String },

    /// Document is empty or yielded no readable text.
    #[error("{0}")]
    EmptyDocument(String),

    /// Document could not be parsed.
    #[error("Failed to read {name}: {reason}")]
    UnreadableDocument { name: String, reason: String },

    /// Training CSV does not have the expected columns or rows.
    #[error("Invalid dataset schema: {0}")]
    DatasetSchema(String),

    /// Training data cannot be used to fit a model.
    #[error("Invalid training data: {0}")]
    InvalidDataset(String),

    /// A caller-supplied argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A saved model is internally inconsistent.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
