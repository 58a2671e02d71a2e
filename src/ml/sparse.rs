//! Sparse feature vectors.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};

/// A sparse row of a feature matrix.
///
/// `indices` is strictly increasing and every index is below `dim`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// The all-zero vector of the given dimensionality.
    pub fn zeros(dim: usize) -> Self {
        SparseVector {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a vector from `(index, value)` pairs.
    ///
    /// Pairs are sorted by index and explicit zeros are dropped. An index
    /// outside `dim` or repeated twice is an error.
    pub fn from_pairs(dim: usize, mut pairs: Vec<(usize, f64)>) -> Result<Self> {
        pairs.sort_by_key(|&(i, _)| i);

        let mut indices = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        for (index, value) in pairs {
            if index >= dim {
                return Err(SentimentError::model(format!(
                    "index {index} out of bounds for dimension {dim}"
                )));
            }
            if indices.last() == Some(&index) {
                return Err(SentimentError::model(format!("duplicate index {index}")));
            }
            if value != 0.0 {
                indices.push(index);
                values.push(value);
            }
        }

        Ok(SparseVector {
            dim,
            indices,
            values,
        })
    }

    /// Build a sparse vector from a dense slice.
    pub fn from_dense(dense: &[f64]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .unzip();

        SparseVector {
            dim: dense.len(),
            indices,
            values,
        }
    }

    /// Dimensionality of the vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// True if no entry is non-zero.
    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over `(index, value)` of the non-zero entries.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at `index` (zero when not stored).
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Dot product with a dense slice of at least `dim` entries.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.iter().map(|(i, v)| v * dense[i]).sum()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Expand into a dense vector.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for (i, v) in self.iter() {
            dense[i] = v;
        }
        dense
    }
}

/// Row-major collection of sparse vectors sharing one dimensionality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    n_cols: usize,
    rows: Vec<SparseVector>,
}

impl SparseMatrix {
    /// An empty matrix with `n_cols` columns.
    pub fn new(n_cols: usize) -> Self {
        SparseMatrix {
            n_cols,
            rows: Vec::new(),
        }
    }

    /// Build a matrix from rows, checking that every row has `n_cols` columns.
    pub fn from_rows(n_cols: usize, rows: Vec<SparseVector>) -> Result<Self> {
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.dim() != n_cols) {
            return Err(SentimentError::model(format!(
                "row {i} has dimension {}, expected {n_cols}",
                row.dim()
            )));
        }
        Ok(SparseMatrix { n_cols, rows })
    }

    /// Append a row.
    pub fn push(&mut self, row: SparseVector) -> Result<()> {
        if row.dim() != self.n_cols {
            return Err(SentimentError::model(format!(
                "row has dimension {}, expected {}",
                row.dim(),
                self.n_cols
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    /// Select rows by index, in the given order.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        let rows = indices
            .iter()
            .map(|&i| {
                self.rows.get(i).cloned().ok_or_else(|| {
                    SentimentError::model(format!(
                        "row {i} out of bounds for {} rows",
                        self.rows.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SparseMatrix {
            n_cols: self.n_cols,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sorts_and_drops_zeros() {
        let v = SparseVector::from_pairs(5, vec![(3, 2.0), (0, 1.0), (1, 0.0)]).unwrap();
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(0, 1.0), (3, 2.0)]);
        assert_eq!(v.get(3), 2.0);
        assert_eq!(v.get(1), 0.0);
        assert_eq!(v.to_dense(), vec![1.0, 0.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_from_pairs_rejects_bad_input() {
        assert!(SparseVector::from_pairs(2, vec![(2, 1.0)]).is_err());
        assert!(SparseVector::from_pairs(4, vec![(1, 1.0), (1, 2.0)]).is_err());
    }

    #[test]
    fn test_dot_and_norm() {
        let v = SparseVector::from_dense(&[3.0, 0.0, 4.0]);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(v.dot(&[1.0, 10.0, 2.0]), 11.0);
        assert!(SparseVector::zeros(3).is_zero());
    }

    #[test]
    fn test_matrix_dimension_checks() {
        let mut m = SparseMatrix::new(3);
        m.push(SparseVector::zeros(3)).unwrap();
        assert!(m.push(SparseVector::zeros(2)).is_err());
        assert!(SparseMatrix::from_rows(3, vec![SparseVector::zeros(4)]).is_err());
    }

    #[test]
    fn test_select() {
        let m = SparseMatrix::from_rows(
            2,
            vec![
                SparseVector::from_dense(&[1.0, 0.0]),
                SparseVector::from_dense(&[0.0, 1.0]),
            ],
        )
        .unwrap();

        let picked = m.select(&[1, 1, 0]).unwrap();
        assert_eq!(picked.n_rows(), 3);
        assert_eq!(picked.row(0).unwrap().get(1), 1.0);
        assert!(m.select(&[2]).is_err());
    }
}
