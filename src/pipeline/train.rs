//! A complete training run: load, prepare, vectorize, split, fit, evaluate,
//! persist.

use std::time::Instant;

use log::{debug, info};

use crate::analysis::preprocessor::Preprocessor;
use crate::data::loader::preview;
use crate::data::{CsvRecordLoader, Emotion, Record, train_test_split};
use crate::error::{Result, SentimentError};
use crate::ml::classifier::Classifier;
use crate::ml::logistic::LogisticRegression;
use crate::ml::metrics::Evaluation;
use crate::ml::sparse::SparseMatrix;
use crate::ml::tfidf::TfIdfVectorizer;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::predictor::{ModelMetadata, SentimentPredictor};

/// Sentence classified at the end of every run.
pub const DEMO_TEXT: &str = "I am feeling very sad about the lockdown situation.";

/// Everything a training run produces.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub predictor: SentimentPredictor,
    /// Metrics on the held-out split.
    pub evaluation: Evaluation,
    /// Table of the first loaded records.
    pub preview: String,
    pub n_records: usize,
    pub n_train: usize,
    pub n_test: usize,
    /// Prediction for [`DEMO_TEXT`].
    pub demo_prediction: Emotion,
}

/// Load the configured CSV, fit the pipeline and write both artifacts.
pub fn train(config: &PipelineConfig) -> Result<TrainingOutcome> {
    config.validate()?;

    let records = CsvRecordLoader::new()
        .with_text_column(&config.data.text_column)
        .with_label_column(&config.data.label_column)
        .load_path(&config.data.csv_path)?;

    let outcome = fit_pipeline(&records, config)?;

    outcome
        .predictor
        .save_files(config.output.vectorizer_path(), config.output.model_path())?;

    Ok(outcome)
}

/// Fit and evaluate the pipeline on in-memory records without touching disk.
///
/// The vectorizer is fitted on the whole corpus; the classifier only on the
/// training split.
pub fn fit_pipeline(records: &[Record], config: &PipelineConfig) -> Result<TrainingOutcome> {
    config.validate()?;
    if records.is_empty() {
        return Err(SentimentError::data("no records to train on"));
    }

    let start = Instant::now();
    let preview = preview(records, config.data.preview_rows);

    info!("Preprocessing {} records", records.len());
    let preprocessor = Preprocessor::new()?;
    let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
    let lemmatized = preprocessor.preprocess_all(&texts)?;
    for (record, text) in records.iter().zip(&lemmatized).take(3) {
        debug!("{:?} -> {:?}", record.text, text);
    }

    info!(
        "Vectorizing with at most {} terms",
        config.vectorizer.max_features
    );
    let mut vectorizer = TfIdfVectorizer::new(config.vectorizer.max_features)?;
    let features = vectorizer.fit_transform(&lemmatized)?;
    let labels: Vec<usize> = records.iter().map(|r| r.sentiment.encode()).collect();

    let split = train_test_split(records.len(), config.split.test_size, config.split.seed)?;
    let x_train = features.select(&split.train)?;
    let x_test = features.select(&split.test)?;
    let (y_train, y_test) = split.apply(&labels);
    info!(
        "Split into {} training and {} test records",
        y_train.len(),
        y_test.len()
    );

    let mut classifier = LogisticRegression::new(config.model);
    classifier.fit(&x_train, &y_train)?;

    let evaluation = evaluate(&classifier, &x_test, &y_test)?;
    info!("Test accuracy: {:.4}", evaluation.accuracy);

    let metadata = ModelMetadata::new(y_train.len(), vectorizer.vocabulary_size());
    let predictor = SentimentPredictor::new(vectorizer, classifier, metadata)?;
    let demo_prediction = predictor.predict(DEMO_TEXT)?;

    info!(
        "Training finished in {:.2}s",
        start.elapsed().as_secs_f64()
    );

    Ok(TrainingOutcome {
        predictor,
        evaluation,
        preview,
        n_records: records.len(),
        n_train: y_train.len(),
        n_test: y_test.len(),
        demo_prediction,
    })
}

/// Score a fitted classifier on held-out rows.
pub fn evaluate<C: Classifier + ?Sized>(
    classifier: &C,
    features: &SparseMatrix,
    labels: &[usize],
) -> Result<Evaluation> {
    debug!(
        "Evaluating {} on {} records",
        classifier.name(),
        features.n_rows()
    );
    let predictions = classifier.predict_batch(features)?;
    Evaluation::new(labels, &predictions, &Emotion::names())
}
