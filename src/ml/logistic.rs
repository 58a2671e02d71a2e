//! Multinomial logistic regression.
//!
//! One weight row and one intercept per class; class probabilities are the
//! softmax of the row scores. Fitting minimizes the mean cross-entropy plus an
//! L2 penalty `||W||² / (2 C n)` on the weights (intercepts are not
//! penalized) with L-BFGS.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};
use crate::ml::classifier::Classifier;
use crate::ml::lbfgs::{self, LbfgsConfig};
use crate::ml::sparse::{SparseMatrix, SparseVector};

/// Hyperparameters of [`LogisticRegression`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionConfig {
    /// Inverse regularization strength.
    pub c: f64,
    /// Maximum number of optimizer iterations.
    pub max_iter: usize,
    /// Gradient tolerance of the optimizer.
    pub tolerance: f64,
    /// Number of correction pairs kept by the optimizer.
    pub memory: usize,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        LogisticRegressionConfig {
            c: 1.0,
            max_iter: 1000,
            tolerance: 1e-4,
            memory: 10,
        }
    }
}

impl LogisticRegressionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.c > 0.0 && self.c.is_finite()) {
            return Err(SentimentError::invalid_config(format!(
                "C must be a positive number, got {}",
                self.c
            )));
        }
        if self.max_iter == 0 {
            return Err(SentimentError::invalid_config("max_iter must be positive"));
        }
        if !(self.tolerance >= 0.0) {
            return Err(SentimentError::invalid_config(
                "tolerance must be non-negative",
            ));
        }
        if self.memory == 0 {
            return Err(SentimentError::invalid_config("memory must be positive"));
        }
        Ok(())
    }
}

/// A multinomial logistic regression classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    config: LogisticRegressionConfig,
    /// Labels seen during fitting, sorted ascending.
    classes: Vec<usize>,
    n_features: usize,
    /// `classes.len() × n_features` weights, row-major.
    coef: Vec<f64>,
    intercept: Vec<f64>,
    n_iter: usize,
    converged: bool,
}

impl LogisticRegression {
    /// Create an unfitted model.
    pub fn new(config: LogisticRegressionConfig) -> Self {
        LogisticRegression {
            config,
            classes: Vec::new(),
            n_features: 0,
            coef: Vec::new(),
            intercept: Vec::new(),
            n_iter: 0,
            converged: false,
        }
    }

    /// Fit the model.
    ///
    /// The classes are the distinct values of `labels`. With a single class no
    /// optimization happens and every prediction is that class.
    pub fn fit(&mut self, features: &SparseMatrix, labels: &[usize]) -> Result<()> {
        self.config.validate()?;
        if features.n_rows() != labels.len() {
            return Err(SentimentError::model(format!(
                "feature matrix has {} rows but {} labels were given",
                features.n_rows(),
                labels.len()
            )));
        }
        if labels.is_empty() {
            return Err(SentimentError::model("cannot fit on an empty training set"));
        }

        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let n_features = features.n_cols();
        let n_classes = classes.len();
        self.classes = classes;
        self.n_features = n_features;

        if n_classes == 1 {
            warn!(
                "Training data contains a single class ({}); the model will always predict it",
                self.classes[0]
            );
            self.coef = vec![0.0; n_features];
            self.intercept = vec![0.0];
            self.n_iter = 0;
            self.converged = true;
            return Ok(());
        }

        // Position of each label in `classes`.
        let targets: Vec<usize> = labels
            .iter()
            .map(|label| self.classes.binary_search(label).unwrap_or_default())
            .collect();

        let n_weights = n_classes * n_features;
        let n = labels.len() as f64;
        let penalty = 1.0 / (self.config.c * n);

        info!(
            "Fitting logistic regression: {} samples, {} features, {} classes",
            labels.len(),
            n_features,
            n_classes
        );

        let mut scores = vec![0.0; n_classes];
        let objective = |params: &[f64], grad: &mut [f64]| -> f64 {
            let (coef, intercept) = params.split_at(n_weights);
            let (grad_coef, grad_intercept) = grad.split_at_mut(n_weights);
            grad_coef.fill(0.0);
            grad_intercept.fill(0.0);

            let mut loss = 0.0;
            for (row, &target) in features.rows().iter().zip(&targets) {
                row_scores(coef, intercept, n_features, row, &mut scores);
                let log_norm = log_sum_exp(&scores);
                loss += log_norm - scores[target];

                for k in 0..n_classes {
                    let mut residual = (scores[k] - log_norm).exp();
                    if k == target {
                        residual -= 1.0;
                    }
                    grad_intercept[k] += residual;
                    let grad_row = &mut grad_coef[k * n_features..(k + 1) * n_features];
                    for (j, value) in row.iter() {
                        grad_row[j] += residual * value;
                    }
                }
            }

            loss /= n;
            grad.iter_mut().for_each(|g| *g /= n);

            let (grad_coef, _) = grad.split_at_mut(n_weights);
            let mut squared = 0.0;
            for (g, w) in grad_coef.iter_mut().zip(coef) {
                *g += penalty * w;
                squared += w * w;
            }

            loss + 0.5 * penalty * squared
        };

        let lbfgs_config = LbfgsConfig {
            max_iter: self.config.max_iter,
            tolerance: self.config.tolerance,
            memory: self.config.memory,
            ..LbfgsConfig::default()
        };
        let report = lbfgs::minimize(objective, vec![0.0; n_weights + n_classes], &lbfgs_config)?;

        if !report.converged {
            warn!(
                "L-BFGS failed to converge after {} iterations (|g| = {:.3e}); increase max_iter",
                report.iterations, report.gradient_norm
            );
        }
        info!(
            "Logistic regression fitted in {} iterations, loss {:.6}",
            report.iterations, report.value
        );

        let mut params = report.x;
        self.intercept = params.split_off(n_weights);
        self.coef = params;
        self.n_iter = report.iterations;
        self.converged = report.converged;

        Ok(())
    }

    /// Softmax probabilities over [`LogisticRegression::classes`].
    pub fn predict_proba(&self, features: &SparseVector) -> Result<Vec<f64>> {
        self.check_input(features)?;

        if self.classes.len() == 1 {
            return Ok(vec![1.0]);
        }

        let mut scores = vec![0.0; self.classes.len()];
        row_scores(
            &self.coef,
            &self.intercept,
            self.n_features,
            features,
            &mut scores,
        );
        let log_norm = log_sum_exp(&scores);
        Ok(scores.iter().map(|s| (s - log_norm).exp()).collect())
    }

    /// The most probable class. Ties go to the smaller class index.
    pub fn predict(&self, features: &SparseVector) -> Result<usize> {
        let proba = self.predict_proba(features)?;
        let best = proba
            .iter()
            .enumerate()
            .fold(0, |best, (k, &p)| if p > proba[best] { k } else { best });
        Ok(self.classes[best])
    }

    /// Predict every row of a matrix.
    pub fn predict_batch(&self, features: &SparseMatrix) -> Result<Vec<usize>> {
        features.rows().iter().map(|row| self.predict(row)).collect()
    }

    fn check_input(&self, features: &SparseVector) -> Result<()> {
        if !self.is_fitted() {
            return Err(SentimentError::model("classifier is not fitted"));
        }
        if features.dim() != self.n_features {
            return Err(SentimentError::model(format!(
                "expected {} features, got {}",
                self.n_features,
                features.dim()
            )));
        }
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Labels known to the model, sorted ascending.
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Weight row of the class at position `k` of [`LogisticRegression::classes`].
    pub fn coefficients(&self, k: usize) -> Option<&[f64]> {
        if k < self.classes.len() {
            Some(&self.coef[k * self.n_features..(k + 1) * self.n_features])
        } else {
            None
        }
    }

    pub fn intercepts(&self) -> &[f64] {
        &self.intercept
    }

    /// Iterations used by the last fit.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Whether the last fit met the tolerance before `max_iter`.
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let model: LogisticRegression = bincode::deserialize(bytes)?;
        model.check_shape()?;
        Ok(model)
    }

    /// Verify that the stored weights agree with the class and feature counts.
    pub fn check_shape(&self) -> Result<()> {
        let n_classes = self.classes.len();
        if self.coef.len() != n_classes * self.n_features || self.intercept.len() != n_classes {
            return Err(SentimentError::serialization(
                "classifier weights do not match its shape",
            ));
        }
        Ok(())
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(LogisticRegressionConfig::default())
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, features: &SparseMatrix, labels: &[usize]) -> Result<()> {
        LogisticRegression::fit(self, features, labels)
    }

    fn predict(&self, features: &SparseVector) -> Result<usize> {
        LogisticRegression::predict(self, features)
    }

    fn predict_batch(&self, features: &SparseMatrix) -> Result<Vec<usize>> {
        LogisticRegression::predict_batch(self, features)
    }

    fn name(&self) -> &str {
        "logistic_regression"
    }
}

fn row_scores(
    coef: &[f64],
    intercept: &[f64],
    n_features: usize,
    row: &SparseVector,
    scores: &mut [f64],
) {
    for (k, score) in scores.iter_mut().enumerate() {
        *score = intercept[k] + row.dot(&coef[k * n_features..(k + 1) * n_features]);
    }
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}
