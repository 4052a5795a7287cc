//! Feature-weight explanations for trained classifiers.

use serde::{Deserialize, Serialize};

use super::ClauseClassifier;

/// Feature shown when a text shares no vocabulary with the model.
pub const NO_FEATURE: &str = "<none>";

/// One of the highest-weighted features of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub class_label: String,
    pub rank: usize,
    pub feature: String,
    pub weight: f64,
}

/// Contribution of one feature of a text to its predicted class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub prediction: String,
    pub feature: String,
    pub contribution: f64,
}

impl ClauseClassifier {
    /// The `top_n` most positive features of every class, ranked from 1.
    pub fn top_features_by_class(&self, top_n: usize) -> Vec<FeatureWeight> {
        let mut rows = Vec::new();
        for (class_label, weights) in self.classes.iter().zip(&self.model.weights) {
            let mut ranked: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

            for (rank, (index, weight)) in ranked.into_iter().take(top_n).enumerate() {
                rows.push(FeatureWeight {
                    class_label: class_label.clone(),
                    rank: rank + 1,
                    feature: self.vectorizer.feature_name(index).unwrap_or_default().to_string(),
                    weight,
                });
            }
        }
        rows
    }

    /// The `top_n` features of `text` that contribute most to its predicted
    /// class, as TF-IDF value times class weight.
    pub fn explain_prediction(&self, text: &str, top_n: usize) -> Vec<FeatureContribution> {
        let vector = self.vectorizer.transform(text);
        let class = self.model.predict_index(&vector);
        let prediction = self.classes.get(class).cloned().unwrap_or_default();

        if vector.is_empty() {
            return vec![FeatureContribution {
                prediction,
                feature: NO_FEATURE.to_string(),
                contribution: 0.0,
            }];
        }

        let weights = &self.model.weights[class];
        let mut contributions: Vec<(usize, f64)> = vector
            .iter()
            .map(|&(index, value)| (index, value * weights[index]))
            .collect();
        contributions.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        contributions
            .into_iter()
            .take(top_n)
            .map(|(index, contribution)| FeatureContribution {
                prediction: prediction.clone(),
                feature: self.vectorizer.feature_name(index).unwrap_or_default().to_string(),
                contribution,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::tests::sample_corpus;
    use crate::classifier::ClassifierKind;
    use pretty_assertions::assert_eq;

    fn trained() -> ClauseClassifier {
        let (texts, labels) = sample_corpus();
        ClauseClassifier::train(ClassifierKind::LogisticRegression, &texts, &labels).unwrap()
    }

    #[test]
    fn test_top_features_per_class() {
        let model = trained();
        let rows = model.top_features_by_class(3);
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].class_label, "Confidentiality");
        assert_eq!(
            rows.iter().take(3).map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(rows[0].weight >= rows[1].weight);

        let indemnity: Vec<&str> = rows
            .iter()
            .filter(|r| r.class_label == "Indemnity")
            .map(|r| r.feature.as_str())
            .collect();
        assert!(indemnity.contains(&"indemnify"));
    }

    #[test]
    fn test_explain_prediction() {
        let model = trained();
        let rows = model.explain_prediction("The recipient must protect confidential information", 2);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.prediction == "Confidentiality"));
        assert!(rows[0].contribution >= rows[1].contribution);
    }

    #[test]
    fn test_explain_prediction_without_known_features() {
        let model = trained();
        let rows = model.explain_prediction("zzz qqq", 5);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].feature, NO_FEATURE);
        assert_eq!(rows[0].contribution, 0.0);
    }
}
