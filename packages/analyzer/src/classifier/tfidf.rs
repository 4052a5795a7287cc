//! TF-IDF text vectorizer with word unigrams and bigrams.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// Word tokens of two or more characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

/// Maximum vocabulary size.
pub const DEFAULT_MAX_FEATURES: usize = 30_000;

/// Sparse vector as `(feature index, value)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Fitted TF-IDF vectorizer.
///
/// Terms are kept sorted so that a term's position is its feature index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    terms: Vec<String>,
    idf: Vec<f64>,
    max_ngram: usize,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and inverse document frequencies on a corpus.
    ///
    /// When the corpus has more than `max_features` distinct terms, the most
    /// frequent ones across the corpus are kept.
    pub fn fit<S: AsRef<str>>(texts: &[S], max_features: usize) -> Self {
        let max_ngram = 2;
        let mut term_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut doc_counts: BTreeMap<String, usize> = BTreeMap::new();

        for text in texts {
            let terms = analyze(text.as_ref(), max_ngram);
            let mut seen: BTreeSet<&str> = BTreeSet::new();
            for term in &terms {
                *term_counts.entry(term.clone()).or_default() += 1;
                if seen.insert(term.as_str()) {
                    *doc_counts.entry(term.clone()).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        if ranked.len() > max_features {
            // Stable sort keeps alphabetical order among equal counts
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            ranked.truncate(max_features);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_docs = texts.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_counts.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        Self {
            terms,
            idf,
            max_ngram,
        }
    }

    /// Number of features (vocabulary size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term for a feature index.
    #[must_use]
    pub fn feature_name(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// Feature index of a term.
    #[must_use]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }

    /// Check that a deserialized vectorizer can be used for lookups.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.idf.len() != self.terms.len() {
            return Err(AnalyzerError::InvalidModel(format!(
                "{} terms but {} idf values",
                self.terms.len(),
                self.idf.len()
            )));
        }
        if !self.terms.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(AnalyzerError::InvalidModel(
                "vocabulary is not sorted".to_string(),
            ));
        }
        if self.max_ngram == 0 {
            return Err(AnalyzerError::InvalidModel(
                "n-gram size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Transform text into an L2-normalized TF-IDF vector.
    ///
    /// Terms outside the vocabulary are ignored; text without known terms
    /// gives an empty vector.
    #[must_use]
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in analyze(text, self.max_ngram) {
            if let Some(index) = self.index_of(&term) {
                *counts.entry(index).or_default() += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();

        let norm = vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

/// Lowercase, tokenize, and expand into n-grams up to `max_ngram` words.
fn analyze(text: &str, max_ngram: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_PATTERN.find_iter(&lower).map(|m| m.as_str()).collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| (*t).to_string()).collect();
    for n in 2..=max_ngram {
        terms.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    terms
}
