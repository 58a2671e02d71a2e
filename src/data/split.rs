//! Seeded train/test split.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, SentimentError};

/// Row indices of the training and held-out partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    /// Indices of training rows.
    pub train: Vec<usize>,
    /// Indices of held-out rows.
    pub test: Vec<usize>,
}

impl TrainTestSplit {
    /// Partition `items` according to this split.
    pub fn apply<T: Clone>(&self, items: &[T]) -> (Vec<T>, Vec<T>) {
        let pick = |indices: &[usize]| indices.iter().map(|&i| items[i].clone()).collect();
        (pick(&self.train), pick(&self.test))
    }
}

/// Shuffle `n` row indices with a seeded RNG and hold out `ceil(test_size * n)`
/// of them.
///
/// The same `(n, test_size, seed)` always yields the same split.
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SentimentError::invalid_argument(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }

    let n_test = (test_size * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(SentimentError::data(format!(
            "cannot split {n} records with test_size {test_size}: both partitions must be non-empty"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    debug!(
        "Split {} records into {} train / {} test (seed {})",
        n,
        train.len(),
        indices.len(),
        seed
    );

    Ok(TrainTestSplit {
        train,
        test: indices,
    })
}
