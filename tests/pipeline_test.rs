//! Integration tests for the training run, persistence and prediction.

use std::fs;
use std::path::Path;

use tweet_sentiment::data::Emotion;
use tweet_sentiment::error::{Result, SentimentError};
use tweet_sentiment::pipeline::predictor::{MODEL_FILE, VECTORIZER_FILE};
use tweet_sentiment::pipeline::train::DEMO_TEXT;
use tweet_sentiment::pipeline::{PipelineConfig, SentimentPredictor, train};

const TEMPLATES: [(&str, &str); 4] = [
    ("fear", "Really scared the virus will reach my family #{i}"),
    ("sad", "Feeling so sad and lonely during this lockdown {i}"),
    ("anger", "@govt I am furious about the endless queues!!! {i}"),
    ("joy", "Happy to see sunshine and smiles today https://t.co/{i}"),
];

fn write_csv(path: &Path, rows: usize, labels: &[&str]) {
    let mut csv = String::from(",text,sentiment\n");
    for i in 0..rows {
        let label = labels[i % labels.len()];
        let template = TEMPLATES
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, t)| *t)
            .unwrap();
        let text = template.replace("{i}", &i.to_string());
        csv.push_str(&format!("{i},\"{text}\",{label}\n"));
    }
    fs::write(path, csv).unwrap();
}

fn config_for(dir: &Path) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.data.csv_path = dir.join("finalSentimentdata2.csv");
    config.output.directory = dir.join("artifacts");
    config
}

#[test]
fn test_train_writes_artifacts_and_evaluates() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_csv(
        &dir.path().join("finalSentimentdata2.csv"),
        60,
        &["fear", "sad", "anger", "joy"],
    );
    let config = config_for(dir.path());

    let outcome = train(&config)?;

    assert_eq!(outcome.n_records, 60);
    assert_eq!(outcome.n_test, 12);
    assert_eq!(outcome.n_train, 48);
    assert_eq!(outcome.evaluation.accuracy, 1.0);
    assert_eq!(outcome.evaluation.confusion.total(), 12);
    assert_eq!(outcome.demo_prediction, Emotion::Sad);

    assert!(config.output.directory.join(VECTORIZER_FILE).exists());
    assert!(config.output.directory.join(MODEL_FILE).exists());

    Ok(())
}

#[test]
fn test_saved_artifacts_reproduce_predictions() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_csv(
        &dir.path().join("finalSentimentdata2.csv"),
        40,
        &["fear", "sad", "anger", "joy"],
    );
    let config = config_for(dir.path());
    let outcome = train(&config)?;

    let restored = SentimentPredictor::load(&config.output.directory)?;

    for text in [
        DEMO_TEXT,
        "The virus scares me",
        "so FURIOUS at these queues",
        "sunshine!",
        "",
        "12345 @nobody http://example.com",
    ] {
        assert_eq!(restored.predict(text)?, outcome.predictor.predict(text)?);
        assert_eq!(
            restored.predict_with_scores(text)?,
            outcome.predictor.predict_with_scores(text)?
        );
    }

    Ok(())
}

#[test]
fn test_prediction_is_deterministic() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_csv(
        &dir.path().join("finalSentimentdata2.csv"),
        40,
        &["fear", "sad", "anger", "joy"],
    );
    let outcome = train(&config_for(dir.path()))?;

    let first = outcome.predictor.predict(DEMO_TEXT)?;
    for _ in 0..5 {
        assert_eq!(outcome.predictor.predict(DEMO_TEXT)?, first);
    }
    assert!(Emotion::ALL.contains(&first));

    Ok(())
}

#[test]
fn test_all_joy_corpus_predicts_joy() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_csv(&dir.path().join("finalSentimentdata2.csv"), 25, &["joy"]);

    let outcome = train(&config_for(dir.path()))?;

    let confusion = &outcome.evaluation.confusion;
    assert_eq!(confusion.get(3, 3), outcome.n_test);
    assert_eq!(outcome.evaluation.accuracy, 1.0);
    assert_eq!(outcome.predictor.predict("terrified and furious")?, Emotion::Joy);

    Ok(())
}

#[test]
fn test_unknown_label_is_an_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("finalSentimentdata2.csv");
    fs::write(&path, "text,sentiment\nok,joy\nhmm,surprise\n")?;

    match train(&config_for(dir.path())) {
        Err(SentimentError::Data(msg)) => assert!(msg.contains("surprise")),
        other => panic!("Expected data error, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_missing_data_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = train(&config_for(dir.path()));
    assert!(matches!(result, Err(SentimentError::Io(_))));
}

#[test]
fn test_config_file_drives_the_run() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let data = dir.path().join("posts.csv");
    write_csv(&data, 40, &["fear", "sad", "anger", "joy"]);

    let config_path = dir.path().join("config.json");
    let json = serde_json::json!({
        "data": { "csv_path": data },
        "split": { "test_size": 0.25, "seed": 7 },
        "vectorizer": { "max_features": 3 },
        "output": { "directory": dir.path().join("out"), "model_file": "model.bin" }
    });
    fs::write(&config_path, json.to_string())?;

    let config = PipelineConfig::load(&config_path)?;
    let outcome = train(&config)?;

    assert_eq!(outcome.n_test, 10);
    assert_eq!(outcome.predictor.vectorizer().vocabulary_size(), 3);
    assert!(dir.path().join("out").join("model.bin").exists());
    assert!(dir.path().join("out").join(VECTORIZER_FILE).exists());

    Ok(())
}
