//! Classifier trait definition.

use crate::error::Result;
use crate::ml::sparse::{SparseMatrix, SparseVector};

/// A trainable classifier over sparse feature rows.
///
/// Labels are encoded class indices.
pub trait Classifier: Send + Sync {
    /// Fit the classifier to a feature matrix and its labels.
    fn fit(&mut self, features: &SparseMatrix, labels: &[usize]) -> Result<()>;

    /// Predict the class of a single row.
    fn predict(&self, features: &SparseVector) -> Result<usize>;

    /// Predict the class of every row of a matrix.
    fn predict_batch(&self, features: &SparseMatrix) -> Result<Vec<usize>> {
        features.rows().iter().map(|row| self.predict(row)).collect()
    }

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
