//! Training data: records, the fixed label mapping, CSV loading and the
//! held-out split.

pub mod label;
pub mod loader;
pub mod split;

pub use label::Emotion;
pub use loader::{CsvRecordLoader, Record};
pub use split::{TrainTestSplit, train_test_split};
