//! Command implementations for the tweet-sentiment CLI.

use anyhow::Context;
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::pipeline::config::{OutputConfig, PipelineConfig};
use crate::pipeline::predictor::SentimentPredictor;
use crate::pipeline::train::train;

/// Execute a CLI command.
pub fn execute_command(args: TweetSentimentArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args, &args),
        Command::Predict(predict_args) => predict_texts(predict_args, &args),
    }
}

/// Build the run configuration from an optional file and flag overrides.
pub fn resolve_config(args: &TrainArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(data) = &args.data {
        config.data.csv_path = data.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Locate the artifacts from an optional config file and `--model-dir`.
pub fn resolve_output(args: &PredictArgs) -> Result<OutputConfig> {
    let mut output = match &args.config {
        Some(path) => PipelineConfig::load(path)?.output,
        None => OutputConfig::default(),
    };

    if let Some(dir) = &args.model_dir {
        output.directory = dir.clone();
    }

    Ok(output)
}

/// Load the predictor the prediction arguments point at.
pub fn load_predictor(args: &PredictArgs) -> Result<SentimentPredictor> {
    let output = resolve_output(args)?;
    let (vectorizer_path, model_path) = (output.vectorizer_path(), output.model_path());
    info!(
        "Loading vectorizer from {} and model from {}",
        vectorizer_path.display(),
        model_path.display()
    );

    let predictor = SentimentPredictor::load_files(&vectorizer_path, &model_path)
        .with_context(|| {
            format!(
                "failed to load model artifacts {} and {}",
                vectorizer_path.display(),
                model_path.display()
            )
        })?;
    Ok(predictor)
}

/// Classify every text with the given predictor.
pub fn classify(predictor: &SentimentPredictor, texts: &[String]) -> Result<Vec<PredictionResult>> {
    texts
        .iter()
        .map(|text| {
            Ok(PredictionResult {
                text: text.clone(),
                prediction: predictor.predict_with_scores(text)?,
            })
        })
        .collect()
}

/// Train and save a model.
fn train_model(args: &TrainArgs, cli_args: &TweetSentimentArgs) -> Result<()> {
    let config = resolve_config(args)?;
    info!("Training on {}", config.data.csv_path.display());

    let outcome = train(&config)?;
    let summary = TrainingSummary::new(
        &outcome,
        &config.output.vectorizer_path(),
        &config.output.model_path(),
    );

    output_training(&outcome, &summary, cli_args)
}

/// Classify texts with a saved model.
fn predict_texts(args: &PredictArgs, cli_args: &TweetSentimentArgs) -> Result<()> {
    let predictor = load_predictor(args)?;
    let results = classify(&predictor, &args.texts)?;
    output_predictions(&results, cli_args)
}
