//! Linear scoring models over sparse TF-IDF vectors.
//!
//! Every supported classifier reduces to one weight row and one intercept per
//! class. Logistic regression and the linear SVM learn them by gradient
//! descent, nearest centroid uses the normalized class means. Prediction is
//! the arg-max score, with ties going to the earlier class.

use serde::{Deserialize, Serialize};

use super::tfidf::SparseVector;

/// Inverse regularization strength for the gradient-descent fits.
pub const DEFAULT_C: f64 = 1.0;

/// Gradient descent iteration budget.
pub const DEFAULT_MAX_ITER: usize = 300;

/// Stop early once the largest gradient component falls below this.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Per-class weight rows and intercepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// Hyperparameters for [`LinearModel::fit_logistic`] and
/// [`LinearModel::fit_svm`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    pub c: f64,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            c: DEFAULT_C,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl LinearModel {
    fn zeros(n_classes: usize, n_features: usize) -> Self {
        Self {
            weights: vec![vec![0.0; n_features]; n_classes],
            intercepts: vec![0.0; n_classes],
        }
    }

    /// Raw class scores for one vector.
    #[must_use]
    pub fn scores(&self, x: &SparseVector) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| intercept + dot(row, x))
            .collect()
    }

    /// Index of the best-scoring class.
    #[must_use]
    pub fn predict_index(&self, x: &SparseVector) -> usize {
        let scores = self.scores(x);
        let mut best = 0;
        for (index, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = index;
            }
        }
        best
    }

    /// Multinomial logistic regression with balanced class weights and an
    /// L2 penalty on the weights (intercepts are not penalized).
    ///
    /// Minimizes `mean_i(w_i * CE_i) + ||W||^2 / (2 * C * n)` by full-batch
    /// gradient descent from zero, so the result is fully deterministic.
    #[must_use]
    pub fn fit_logistic(
        xs: &[SparseVector],
        ys: &[usize],
        n_classes: usize,
        n_features: usize,
        params: &SolverParams,
    ) -> Self {
        let mut model = Self::zeros(n_classes, n_features);
        let n = xs.len();
        if n == 0 || n_classes == 0 {
            return model;
        }

        let sample_weights = balanced_weights(ys, n_classes);
        let lambda = 1.0 / (params.c * n as f64);
        // Softmax curvature is bounded by 1/2 per unit of squared norm; inputs
        // are unit vectors plus the intercept term, and weights average to 1.
        let max_weight = sample_weights.iter().copied().fold(0.0, f64::max);
        let learning_rate = 1.0 / (max_weight + lambda);

        for iteration in 0..params.max_iter {
            let mut grad_w = vec![vec![0.0; n_features]; n_classes];
            let mut grad_b = vec![0.0; n_classes];

            for ((x, &y), &weight) in xs.iter().zip(ys).zip(&sample_weights) {
                let probabilities = softmax(&model.scores(x));
                for (class, p) in probabilities.iter().enumerate() {
                    let target = if class == y { 1.0 } else { 0.0 };
                    let residual = weight * (p - target) / n as f64;
                    if residual == 0.0 {
                        continue;
                    }
                    grad_b[class] += residual;
                    for &(feature, value) in x {
                        grad_w[class][feature] += residual * value;
                    }
                }
            }

            let mut max_grad: f64 = 0.0;
            for class in 0..n_classes {
                for (g, w) in grad_w[class].iter_mut().zip(&model.weights[class]) {
                    *g += lambda * w;
                    max_grad = max_grad.max(g.abs());
                }
                max_grad = max_grad.max(grad_b[class].abs());
            }

            if max_grad < params.tolerance {
                tracing::debug!(iteration, max_grad, "Logistic regression converged");
                break;
            }

            for class in 0..n_classes {
                for (w, g) in model.weights[class].iter_mut().zip(&grad_w[class]) {
                    *w -= learning_rate * g;
                }
                model.intercepts[class] -= learning_rate * grad_b[class];
            }
        }

        model
    }

    /// One-vs-rest linear SVM with squared hinge loss, balanced class weights
    /// and an L2 penalty on the weights.
    ///
    /// Each class row minimizes
    /// `mean_i(w_i * max(0, 1 - y_i * f(x_i))^2) + ||w||^2 / (2 * C * n)`
    /// with `y_i = +1` for the class and `-1` otherwise. Like
    /// [`LinearModel::fit_logistic`] this is full-batch gradient descent from
    /// zero.
    #[must_use]
    pub fn fit_svm(
        xs: &[SparseVector],
        ys: &[usize],
        n_classes: usize,
        n_features: usize,
        params: &SolverParams,
    ) -> Self {
        let mut model = Self::zeros(n_classes, n_features);
        let n = xs.len();
        if n == 0 || n_classes == 0 {
            return model;
        }

        let sample_weights = balanced_weights(ys, n_classes);
        let lambda = 1.0 / (params.c * n as f64);
        // Squared hinge curvature is 2 per unit of squared norm, and the
        // augmented inputs have squared norm at most 2.
        let max_weight = sample_weights.iter().copied().fold(0.0, f64::max);
        let learning_rate = 1.0 / (4.0 * max_weight + lambda);

        for class in 0..n_classes {
            let targets: Vec<f64> = ys
                .iter()
                .map(|&y| if y == class { 1.0 } else { -1.0 })
                .collect();

            for iteration in 0..params.max_iter {
                let mut grad_w = vec![0.0; n_features];
                let mut grad_b = 0.0;

                for ((x, &target), &weight) in xs.iter().zip(&targets).zip(&sample_weights) {
                    let score = model.intercepts[class] + dot(&model.weights[class], x);
                    let margin = 1.0 - target * score;
                    if margin <= 0.0 {
                        continue;
                    }
                    let residual = -2.0 * weight * margin * target / n as f64;
                    grad_b += residual;
                    for &(feature, value) in x {
                        grad_w[feature] += residual * value;
                    }
                }

                let mut max_grad = grad_b.abs();
                for (g, w) in grad_w.iter_mut().zip(&model.weights[class]) {
                    *g += lambda * w;
                    max_grad = max_grad.max(g.abs());
                }

                if max_grad < params.tolerance {
                    tracing::debug!(class, iteration, max_grad, "Linear SVM converged");
                    break;
                }

                for (w, g) in model.weights[class].iter_mut().zip(&grad_w) {
                    *w -= learning_rate * g;
                }
                model.intercepts[class] -= learning_rate * grad_b;
            }
        }

        model
    }

    /// Nearest-centroid classifier expressed as a linear model.
    ///
    /// Each row is the L2-normalized mean vector of a class, so the score of
    /// a unit input vector is its cosine similarity to the class centroid.
    #[must_use]
    pub fn fit_centroid(
        xs: &[SparseVector],
        ys: &[usize],
        n_classes: usize,
        n_features: usize,
    ) -> Self {
        let mut model = Self::zeros(n_classes, n_features);
        let mut counts = vec![0usize; n_classes];

        for (x, &y) in xs.iter().zip(ys) {
            counts[y] += 1;
            for &(feature, value) in x {
                model.weights[y][feature] += value;
            }
        }

        for (row, count) in model.weights.iter_mut().zip(counts) {
            if count == 0 {
                continue;
            }
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for value in row.iter_mut() {
                    *value /= norm;
                }
            }
        }

        model
    }
}

fn dot(row: &[f64], x: &SparseVector) -> f64 {
    x.iter().map(|&(feature, value)| row[feature] * value).sum()
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// `n_samples / (n_classes * count)` per sample.
fn balanced_weights(ys: &[usize], n_classes: usize) -> Vec<f64> {
    let mut counts = vec![0usize; n_classes];
    for &y in ys {
        counts[y] += 1;
    }
    let present = counts.iter().filter(|&&c| c > 0).count().max(1);
    ys.iter()
        .map(|&y| ys.len() as f64 / (present * counts[y]) as f64)
        .collect()
}
