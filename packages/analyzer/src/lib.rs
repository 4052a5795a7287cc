//! Contract Risk Analyzer - Classify contract clauses and map them to risk.
//!
//! This crate reads contracts (TXT or PDF), splits them into clauses with
//! [`contract_risk_segmentation`], predicts a clause type for each one with a
//! TF-IDF linear classifier, and maps the type to a severity and risk score.
//!
//! # Example
//!
//! ```
//! use contract_risk_analyzer::{analyze_text, ClassifierKind, ClauseClassifier, Severity};
//! use contract_risk_segmentation::SegmentOptions;
//!
//! let classifier = ClauseClassifier::train(
//!     ClassifierKind::LogisticRegression,
//!     &["The supplier shall indemnify the customer", "Either party may terminate"],
//!     &["Indemnity", "Termination"],
//! )
//! .unwrap();
//!
//! let rows = analyze_text(
//!     "1 The supplier shall indemnify the customer for all losses.",
//!     &classifier,
//!     &SegmentOptions::default(),
//! );
//! assert_eq!(rows[0].predicted_type, "Indemnity");
//! assert_eq!(rows[0].severity, Severity::High);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Project paths, defaults and environment overrides
//! - [`error`]: Error types and Result alias
//! - [`ingestion`]: Text extraction from TXT and PDF documents
//! - [`dataset`]: Labelled training CSV loading
//! - [`classifier`]: TF-IDF vectorizer, linear models, persistence
//! - [`evaluation`]: Train/test split, metrics and report files
//! - [`risk`]: Clause type to severity mapping
//! - [`review`]: Per-clause risk rows, filtering and export
//! - [`cli`]: Command-line interface

pub mod classifier;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod ingestion;
pub mod review;
pub mod risk;

// Re-export commonly used items
pub use classifier::{
    load_model, load_or_train_model, save_model, ClassifierKind, ClauseClassifier,
};
pub use config::{resolve_training_csv, ProjectConfig};
pub use dataset::{load_training_dataset, LabeledClause};
pub use error::{AnalyzerError, Result};
pub use evaluation::{
    classification_report, compare_baseline_models, confusion_matrix, evaluate_classifier,
    train_test_split, SummaryMetrics, TrainTestSplit,
};
pub use ingestion::{extract_text_from_path, extract_text_from_upload, DocumentKind};
pub use review::{analyze_text, highlighted, to_csv, to_json, ClauseRisk, ReviewFilter};
pub use risk::{map_clause_type_to_risk, risk_badge_color, RiskProfile, Severity};
