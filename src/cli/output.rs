//! Output formatting for CLI commands.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TweetSentimentArgs};
use crate::data::Emotion;
use crate::error::Result;
use crate::ml::metrics::{ClassificationReport, ConfusionMatrix};
use crate::pipeline::predictor::Prediction;
use crate::pipeline::train::{DEMO_TEXT, TrainingOutcome};

/// Result structure for a training run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub records: usize,
    pub train_records: usize,
    pub test_records: usize,
    pub vocabulary_size: usize,
    pub iterations: usize,
    pub converged: bool,
    pub accuracy: f64,
    pub report: ClassificationReport,
    pub confusion_matrix: ConfusionMatrix,
    pub vectorizer_path: String,
    pub model_path: String,
    pub demo_text: String,
    pub demo_prediction: Emotion,
}

impl TrainingSummary {
    pub fn new(outcome: &TrainingOutcome, vectorizer_path: &Path, model_path: &Path) -> Self {
        let classifier = outcome.predictor.classifier();
        TrainingSummary {
            records: outcome.n_records,
            train_records: outcome.n_train,
            test_records: outcome.n_test,
            vocabulary_size: outcome.predictor.vectorizer().vocabulary_size(),
            iterations: classifier.n_iter(),
            converged: classifier.converged(),
            accuracy: outcome.evaluation.accuracy,
            report: outcome.evaluation.report.clone(),
            confusion_matrix: outcome.evaluation.confusion.clone(),
            vectorizer_path: vectorizer_path.to_string_lossy().to_string(),
            model_path: model_path.to_string_lossy().to_string(),
            demo_text: DEMO_TEXT.to_string(),
            demo_prediction: outcome.demo_prediction,
        }
    }
}

/// Result structure for one classified text.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub text: String,
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// Print a training run in the requested format.
pub fn output_training(
    outcome: &TrainingOutcome,
    summary: &TrainingSummary,
    args: &TweetSentimentArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(summary),
        OutputFormat::Human => {
            println!("{}", outcome.preview);
            println!("Accuracy: {}", summary.accuracy);
            println!("Classification Report:");
            println!("{}", summary.report);
            println!("{}", summary.confusion_matrix.render_heatmap());
            if args.verbosity() > 1 {
                println!(
                    "Vocabulary: {} terms, {} training / {} test records, {} iterations",
                    summary.vocabulary_size,
                    summary.train_records,
                    summary.test_records,
                    summary.iterations
                );
            }
            println!("Saved vectorizer to {}", summary.vectorizer_path);
            println!("Saved model to {}", summary.model_path);
            println!("Predicted Sentiment: {}", summary.demo_prediction);
            Ok(())
        }
    }
}

/// Print predictions in the requested format.
pub fn output_predictions(results: &[PredictionResult], args: &TweetSentimentArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(&results),
        OutputFormat::Human => {
            for result in results {
                if results.len() > 1 {
                    println!("{}", result.text);
                }
                println!("Predicted Sentiment: {}", result.prediction.emotion);
                if args.verbosity() > 1 {
                    for (emotion, score) in &result.prediction.scores {
                        println!("  {emotion:<6} {score:.4}");
                    }
                }
            }
            Ok(())
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
