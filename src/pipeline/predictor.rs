//! Fitted end-to-end predictor and its on-disk artifacts.
//!
//! A predictor is persisted as two files: the vectorizer state and the
//! classifier together with training metadata. Both are bincode blobs with no
//! compatibility guarantee across crate versions.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::preprocessor::Preprocessor;
use crate::data::Emotion;
use crate::error::{Result, SentimentError};
use crate::ml::logistic::LogisticRegression;
use crate::ml::tfidf::TfIdfVectorizer;

/// Default file name of the vectorizer artifact.
pub const VECTORIZER_FILE: &str = "vectorizer.bin";

/// Default file name of the classifier artifact.
pub const MODEL_FILE: &str = "sentiment_analysis_model.bin";

/// Facts about how a model was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Crate version that wrote the artifact.
    pub version: String,
    pub trained_at: DateTime<Utc>,
    pub train_samples: usize,
    pub vocabulary_size: usize,
}

impl ModelMetadata {
    pub fn new(train_samples: usize, vocabulary_size: usize) -> Self {
        ModelMetadata {
            version: crate::VERSION.to_string(),
            trained_at: Utc::now(),
            train_samples,
            vocabulary_size,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ModelArtifact {
    metadata: ModelMetadata,
    classifier: LogisticRegression,
}

/// A prediction with the probability of every known label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub emotion: Emotion,
    /// Probabilities in label order; sums to one.
    pub scores: Vec<(Emotion, f64)>,
}

/// Raw text in, emotion out.
#[derive(Debug)]
pub struct SentimentPredictor {
    preprocessor: Preprocessor,
    vectorizer: TfIdfVectorizer,
    classifier: LogisticRegression,
    metadata: ModelMetadata,
}

impl SentimentPredictor {
    /// Assemble a predictor from fitted components.
    pub fn new(
        vectorizer: TfIdfVectorizer,
        classifier: LogisticRegression,
        metadata: ModelMetadata,
    ) -> Result<Self> {
        if !vectorizer.is_fitted() || !classifier.is_fitted() {
            return Err(SentimentError::model(
                "predictor requires a fitted vectorizer and classifier",
            ));
        }
        if vectorizer.vocabulary_size() != classifier.n_features() {
            return Err(SentimentError::model(format!(
                "vectorizer produces {} features but the classifier expects {}",
                vectorizer.vocabulary_size(),
                classifier.n_features()
            )));
        }

        Ok(SentimentPredictor {
            preprocessor: Preprocessor::new()?,
            vectorizer,
            classifier,
            metadata,
        })
    }

    /// Predict the emotion of a raw post.
    pub fn predict(&self, text: &str) -> Result<Emotion> {
        let lemmatized = self.preprocessor.preprocess(text)?;
        let features = self.vectorizer.transform(&lemmatized)?;
        Emotion::decode(self.classifier.predict(&features)?)
    }

    /// Predict the emotion of a raw post along with class probabilities.
    pub fn predict_with_scores(&self, text: &str) -> Result<Prediction> {
        let lemmatized = self.preprocessor.preprocess(text)?;
        let features = self.vectorizer.transform(&lemmatized)?;
        let proba = self.classifier.predict_proba(&features)?;

        let scores = self
            .classifier
            .classes()
            .iter()
            .zip(proba)
            .map(|(&class, p)| Ok((Emotion::decode(class)?, p)))
            .collect::<Result<Vec<_>>>()?;

        let emotion = Emotion::decode(self.classifier.predict(&features)?)?;
        Ok(Prediction { emotion, scores })
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Write both artifacts into `dir` under the default file names.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        self.save_files(dir.join(VECTORIZER_FILE), dir.join(MODEL_FILE))
    }

    /// Write the artifacts to explicit paths, creating parent directories.
    pub fn save_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        vectorizer_path: P,
        model_path: Q,
    ) -> Result<()> {
        let vectorizer_path = vectorizer_path.as_ref();
        let model_path = model_path.as_ref();

        for path in [vectorizer_path, model_path] {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(vectorizer_path, self.vectorizer.to_bytes()?)?;
        let artifact = ModelArtifact {
            metadata: self.metadata.clone(),
            classifier: self.classifier.clone(),
        };
        fs::write(model_path, bincode::serialize(&artifact)?)?;

        info!(
            "Saved vectorizer to {} and model to {}",
            vectorizer_path.display(),
            model_path.display()
        );
        Ok(())
    }

    /// Load both artifacts from `dir` under the default file names.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Self::load_files(dir.join(VECTORIZER_FILE), dir.join(MODEL_FILE))
    }

    /// Load the artifacts from explicit paths.
    pub fn load_files<P: AsRef<Path>, Q: AsRef<Path>>(
        vectorizer_path: P,
        model_path: Q,
    ) -> Result<Self> {
        let vectorizer_path = vectorizer_path.as_ref();
        let model_path = model_path.as_ref();

        let vectorizer = TfIdfVectorizer::from_bytes(&fs::read(vectorizer_path)?)?;
        let artifact: ModelArtifact = bincode::deserialize(&fs::read(model_path)?)?;
        artifact.classifier.check_shape()?;

        debug!(
            "Loaded model written by version {} at {}",
            artifact.metadata.version, artifact.metadata.trained_at
        );

        Self::new(vectorizer, artifact.classifier, artifact.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::sparse::SparseMatrix;

    fn fitted() -> SentimentPredictor {
        let docs = vec![
            "scared virus".to_string(),
            "sad lonely".to_string(),
            "angry queue".to_string(),
            "happy sunshine".to_string(),
        ];
        let mut vectorizer = TfIdfVectorizer::new(100).unwrap();
        let x: SparseMatrix = vectorizer.fit_transform(&docs).unwrap();
        let mut classifier = LogisticRegression::default();
        classifier.fit(&x, &[0, 1, 2, 3]).unwrap();
        let metadata = ModelMetadata::new(docs.len(), vectorizer.vocabulary_size());
        SentimentPredictor::new(vectorizer, classifier, metadata).unwrap()
    }

    #[test]
    fn test_predict() {
        let predictor = fitted();
        assert_eq!(predictor.predict("So SAD and lonely!!").unwrap(), Emotion::Sad);
        assert_eq!(
            predictor.predict("@friend happy days http://t.co/x").unwrap(),
            Emotion::Joy
        );
    }

    #[test]
    fn test_predict_with_scores() {
        let predictor = fitted();
        let prediction = predictor.predict_with_scores("scared of the virus").unwrap();

        assert_eq!(prediction.emotion, Emotion::Fear);
        assert_eq!(prediction.scores.len(), 4);
        let total: f64 = prediction.scores.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(prediction.scores[0].0, Emotion::Fear);
    }

    #[test]
    fn test_save_and_load() {
        let predictor = fitted();
        let dir = tempfile::tempdir().unwrap();
        predictor.save(dir.path()).unwrap();

        assert!(dir.path().join(VECTORIZER_FILE).exists());
        assert!(dir.path().join(MODEL_FILE).exists());

        let restored = SentimentPredictor::load(dir.path()).unwrap();
        assert_eq!(restored.metadata(), predictor.metadata());
        for text in ["sad", "angry at the queue", "", "nothing known here"] {
            assert_eq!(
                restored.predict(text).unwrap(),
                predictor.predict(text).unwrap()
            );
        }
    }

    #[test]
    fn test_load_missing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SentimentPredictor::load(dir.path()).is_err());
    }

    #[test]
    fn test_rejects_mismatched_components() {
        let mut vectorizer = TfIdfVectorizer::new(100).unwrap();
        let x = vectorizer
            .fit_transform(&["sad day".to_string(), "happy day".to_string()])
            .unwrap();
        let mut classifier = LogisticRegression::default();
        classifier.fit(&x, &[1, 3]).unwrap();

        let mut other = TfIdfVectorizer::new(100).unwrap();
        other.fit(&["one two three four".to_string()]).unwrap();

        let metadata = ModelMetadata::new(2, 4);
        assert!(SentimentPredictor::new(other, classifier, metadata).is_err());
    }
}
