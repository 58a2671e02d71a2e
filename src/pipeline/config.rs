//! Configuration of a training run.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! reproduces the standard run: `finalSentimentdata2.csv`, an 80/20 split
//! with seed 42, at most 5000 TF-IDF terms and logistic regression with
//! `C = 1.0` capped at 1000 iterations.
//!
//! ```json
//! {
//!   "data": { "csv_path": "tweets.csv" },
//!   "split": { "seed": 7 },
//!   "model": { "max_iter": 200 }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};
use crate::ml::logistic::LogisticRegressionConfig;
use crate::ml::tfidf::DEFAULT_MAX_FEATURES;
use crate::pipeline::predictor::{MODEL_FILE, VECTORIZER_FILE};

/// Input data settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub csv_path: PathBuf,
    pub text_column: String,
    pub label_column: String,
    /// Rows shown in the preview printed after loading.
    pub preview_rows: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            csv_path: PathBuf::from("finalSentimentdata2.csv"),
            text_column: "text".to_string(),
            label_column: "sentiment".to_string(),
            preview_rows: 5,
        }
    }
}

/// Held-out split settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Fraction of records held out for evaluation.
    pub test_size: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            test_size: 0.2,
            seed: 42,
        }
    }
}

/// Vectorizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub max_features: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        VectorizerConfig {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

/// Where fitted artifacts are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub vectorizer_file: String,
    pub model_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            directory: PathBuf::from("."),
            vectorizer_file: VECTORIZER_FILE.to_string(),
            model_file: MODEL_FILE.to_string(),
        }
    }
}

impl OutputConfig {
    pub fn vectorizer_path(&self) -> PathBuf {
        self.directory.join(&self.vectorizer_file)
    }

    pub fn model_path(&self) -> PathBuf {
        self.directory.join(&self.model_file)
    }
}

/// Settings of a full training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data: DataConfig,
    pub split: SplitConfig,
    pub vectorizer: VectorizerConfig,
    pub model: LogisticRegressionConfig,
    pub output: OutputConfig,
}

impl PipelineConfig {
    /// Read a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        let config: PipelineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.split.test_size > 0.0 && self.split.test_size < 1.0) {
            return Err(SentimentError::invalid_config(format!(
                "split.test_size must be in (0, 1), got {}",
                self.split.test_size
            )));
        }
        if self.vectorizer.max_features == 0 {
            return Err(SentimentError::invalid_config(
                "vectorizer.max_features must be positive",
            ));
        }
        if self.data.text_column.is_empty() || self.data.label_column.is_empty() {
            return Err(SentimentError::invalid_config("column names must not be empty"));
        }
        if self.output.vectorizer_file == self.output.model_file {
            return Err(SentimentError::invalid_config(
                "vectorizer and model must be written to different files",
            ));
        }
        self.model.validate()
    }
}
