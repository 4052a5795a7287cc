//! Clause type classification.
//!
//! A [`ClauseClassifier`] couples a fitted [`TfidfVectorizer`] with a
//! [`LinearModel`] and the sorted list of class labels. Models are persisted
//! as JSON so that a trained model can be reused across runs.

mod explain;
pub mod linear;
pub mod tfidf;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::{resolve_training_csv, ProjectConfig};
use crate::dataset::{into_columns, load_training_dataset};
use crate::error::{AnalyzerError, Result};

pub use explain::{FeatureContribution, FeatureWeight};
pub use linear::{LinearModel, SolverParams};
pub use tfidf::{SparseVector, TfidfVectorizer, DEFAULT_MAX_FEATURES};

/// Supported classifier families.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClassifierKind {
    LogisticRegression,
    LinearSvc,
    NearestCentroid,
}

impl ClassifierKind {
    /// Every kind, in comparison order.
    pub const ALL: [ClassifierKind; 3] = [
        Self::LogisticRegression,
        Self::LinearSvc,
        Self::NearestCentroid,
    ];
}

/// Trained TF-IDF + linear clause classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseClassifier {
    kind: ClassifierKind,
    vectorizer: TfidfVectorizer,
    classes: Vec<String>,
    model: LinearModel,
}

impl ClauseClassifier {
    /// Train a classifier on parallel text and label slices.
    pub fn train<S: AsRef<str>, L: AsRef<str>>(
        kind: ClassifierKind,
        texts: &[S],
        labels: &[L],
    ) -> Result<Self> {
        if texts.is_empty() {
            return Err(AnalyzerError::InvalidDataset(
                "no training examples".to_string(),
            ));
        }
        if texts.len() != labels.len() {
            return Err(AnalyzerError::InvalidDataset(format!(
                "{} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }

        let classes: Vec<String> = labels
            .iter()
            .map(|label| label.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let vectorizer = TfidfVectorizer::fit(texts, DEFAULT_MAX_FEATURES);
        let xs: Vec<SparseVector> = texts
            .iter()
            .map(|text| vectorizer.transform(text.as_ref()))
            .collect();
        let ys: Vec<usize> = labels
            .iter()
            .map(|label| class_index(&classes, label.as_ref()))
            .collect::<Option<_>>()
            .ok_or_else(|| AnalyzerError::InvalidDataset("unknown label".to_string()))?;

        let model = match kind {
            ClassifierKind::LogisticRegression => LinearModel::fit_logistic(
                &xs,
                &ys,
                classes.len(),
                vectorizer.len(),
                &SolverParams::default(),
            ),
            ClassifierKind::LinearSvc => LinearModel::fit_svm(
                &xs,
                &ys,
                classes.len(),
                vectorizer.len(),
                &SolverParams::default(),
            ),
            ClassifierKind::NearestCentroid => {
                LinearModel::fit_centroid(&xs, &ys, classes.len(), vectorizer.len())
            }
        };

        tracing::info!(
            kind = %kind,
            examples = texts.len(),
            classes = classes.len(),
            features = vectorizer.len(),
            "Trained clause classifier"
        );

        Ok(Self {
            kind,
            vectorizer,
            classes,
            model,
        })
    }

    /// Classifier family this model was trained with.
    pub fn kind(&self) -> ClassifierKind {
        self.kind
    }

    /// Class labels in sorted order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check that the vectorizer, labels and weight matrix agree in shape.
    fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;

        if self.classes.is_empty() {
            return Err(AnalyzerError::InvalidModel("no classes".to_string()));
        }
        if !self.classes.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(AnalyzerError::InvalidModel(
                "class labels are not sorted".to_string(),
            ));
        }
        let n_classes = self.classes.len();
        if self.model.weights.len() != n_classes || self.model.intercepts.len() != n_classes {
            return Err(AnalyzerError::InvalidModel(format!(
                "{} classes but {} weight rows and {} intercepts",
                n_classes,
                self.model.weights.len(),
                self.model.intercepts.len()
            )));
        }
        let n_features = self.vectorizer.len();
        if let Some(row) = self.model.weights.iter().position(|row| row.len() != n_features) {
            return Err(AnalyzerError::InvalidModel(format!(
                "weight row {} has {} values, expected {}",
                row,
                self.model.weights[row].len(),
                n_features
            )));
        }
        Ok(())
    }

    /// Predict the clause type of a single text.
    pub fn predict_one(&self, text: &str) -> &str {
        let index = self.model.predict_index(&self.vectorizer.transform(text));
        self.classes.get(index).map_or("", String::as_str)
    }

    /// Predict clause types for a batch of texts.
    pub fn predict<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        texts
            .iter()
            .map(|text| self.predict_one(text.as_ref()).to_string())
            .collect()
    }
}

fn class_index(classes: &[String], label: &str) -> Option<usize> {
    classes.binary_search_by(|c| c.as_str().cmp(label)).ok()
}

/// Save a classifier as JSON, creating parent directories as needed.
pub fn save_model(model: &ClauseClassifier, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string(model)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Saved model");
    Ok(path.to_path_buf())
}

/// Load a classifier saved by [`save_model`].
///
/// A file whose dimensions do not line up is rejected with
/// [`AnalyzerError::InvalidModel`].
pub fn load_model(path: &Path) -> Result<ClauseClassifier> {
    let content = fs::read_to_string(path)?;
    let model: ClauseClassifier = serde_json::from_str(&content)?;
    model.validate()?;
    tracing::debug!(path = %path.display(), "Loaded model");
    Ok(model)
}

/// Load the model at `model_path` (or the configured default), training and
/// saving a logistic regression model first if none exists yet.
pub fn load_or_train_model(
    config: &ProjectConfig,
    model_path: Option<&Path>,
) -> Result<ClauseClassifier> {
    let path = model_path.unwrap_or(&config.model_path);
    if path.exists() {
        return load_model(path);
    }

    let csv_path = resolve_training_csv(None, config);
    tracing::info!(
        model = %path.display(),
        csv = %csv_path.display(),
        "Model not found, training a new one"
    );
    let (texts, labels) = into_columns(load_training_dataset(&csv_path)?);
    let model = ClauseClassifier::train(ClassifierKind::LogisticRegression, &texts, &labels)?;
    save_model(&model, path)?;
    Ok(model)
}
