//! End-to-end training and prediction.

pub mod config;
pub mod predictor;
pub mod train;

pub use config::PipelineConfig;
pub use predictor::{Prediction, SentimentPredictor};
pub use train::{TrainingOutcome, fit_pipeline, train};
