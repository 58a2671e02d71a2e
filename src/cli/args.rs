//! Command line argument parsing for the tweet-sentiment CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// tweet-sentiment - emotion classification of short social-media posts
#[derive(Parser, Debug, Clone)]
#[command(name = "tweet-sentiment")]
#[command(about = "Train and apply a TF-IDF + logistic regression emotion classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TweetSentimentArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TweetSentimentArgs {
    /// Get the effective verbosity level (0 = quiet, 1 = default).
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train the classifier on a CSV file and save the artifacts
    Train(TrainArgs),

    /// Classify texts with previously saved artifacts
    Predict(PredictArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// CSV file with `text` and `sentiment` columns
    #[arg(short, long, value_name = "CSV_FILE", env = "TWEET_SENTIMENT_DATA")]
    pub data: Option<PathBuf>,

    /// Directory the artifacts are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Directory holding the artifacts (defaults to the configured output directory)
    #[arg(short, long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// Pipeline configuration file (JSON) the model was trained with
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Texts to classify, one per argument
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train_defaults() {
        let args = TweetSentimentArgs::try_parse_from(["tweet-sentiment", "train"]).unwrap();
        assert_eq!(args.verbosity(), 1);
        assert_eq!(args.output_format, OutputFormat::Human);
        match args.command {
            Command::Train(train) => {
                assert!(train.output_dir.is_none());
                assert!(train.config.is_none());
            }
            other => panic!("Expected train command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_predict() {
        let args = TweetSentimentArgs::try_parse_from([
            "tweet-sentiment",
            "-vv",
            "predict",
            "--model-dir",
            "models",
            "so sad",
            "so happy",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 3);
        match args.command {
            Command::Predict(predict) => {
                assert_eq!(predict.model_dir, Some(PathBuf::from("models")));
                assert!(predict.config.is_none());
                assert_eq!(predict.texts, vec!["so sad", "so happy"]);
            }
            other => panic!("Expected predict command, got {other:?}"),
        }
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args =
            TweetSentimentArgs::try_parse_from(["tweet-sentiment", "-v", "-q", "train"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_predict_requires_text() {
        assert!(TweetSentimentArgs::try_parse_from(["tweet-sentiment", "predict"]).is_err());
    }
}
