//! Configuration defaults and path resolution for the analyzer.

use std::path::{Path, PathBuf};

/// Default location of the trained model.
pub const DEFAULT_MODEL_PATH: &str = "models/model.json";

/// Default directory for evaluation reports.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Preferred training dataset.
pub const DEFAULT_TRAIN_CSV: &str = "data/raw/legal_docs_modified.csv";

/// Small bundled dataset used when the preferred one is absent.
pub const FALLBACK_TRAIN_CSV: &str = "data/demo/sample_training.csv";

/// Default fraction of the dataset held out for evaluation.
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Text wrap width for clause text in the terminal table.
pub const TEXT_WRAP_WIDTH: usize = 80;

/// Paths used by training, evaluation and analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub model_path: PathBuf,
    pub reports_dir: PathBuf,
    pub default_train_csv: PathBuf,
    pub fallback_train_csv: PathBuf,
}

impl ProjectConfig {
    /// Build the configuration from environment variables, falling back to defaults.
    ///
    /// - `CONTRACT_RISK_MODEL_PATH`
    /// - `CONTRACT_RISK_REPORTS_DIR`
    /// - `CONTRACT_RISK_TRAIN_CSV`
    /// - `CONTRACT_RISK_FALLBACK_CSV`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| -> PathBuf {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
                .into()
        };

        Self {
            model_path: path("CONTRACT_RISK_MODEL_PATH", DEFAULT_MODEL_PATH),
            reports_dir: path("CONTRACT_RISK_REPORTS_DIR", DEFAULT_REPORTS_DIR),
            default_train_csv: path("CONTRACT_RISK_TRAIN_CSV", DEFAULT_TRAIN_CSV),
            fallback_train_csv: path("CONTRACT_RISK_FALLBACK_CSV", FALLBACK_TRAIN_CSV),
        }
    }

    #[must_use]
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    #[must_use]
    pub fn with_reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reports_dir = dir.into();
        self
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Resolve the training CSV.
///
/// An explicitly requested path always wins. Otherwise the preferred dataset
/// is used when it exists, and the bundled fallback when it does not.
pub fn resolve_training_csv(requested: Option<&Path>, config: &ProjectConfig) -> PathBuf {
    if let Some(path) = requested {
        return path.to_path_buf();
    }

    if config.default_train_csv.exists() {
        return config.default_train_csv.clone();
    }

    tracing::debug!(
        missing = %config.default_train_csv.display(),
        fallback = %config.fallback_train_csv.display(),
        "Preferred training CSV not found, using fallback"
    );
    config.fallback_train_csv.clone()
}
