//! # tweet-sentiment
//!
//! Emotion classification of short social-media posts. Posts are labelled
//! `fear`, `sad`, `anger` or `joy` by a bag-of-words model:
//!
//! 1. [`data`]: load `text`/`sentiment` records from CSV,
//! 2. [`analysis`]: strip URLs, mentions and non-letters, drop stopwords,
//!    lemmatize,
//! 3. [`ml::tfidf`]: TF-IDF over at most 5000 terms,
//! 4. [`ml::logistic`]: multinomial logistic regression fitted with L-BFGS,
//! 5. [`ml::metrics`]: accuracy, classification report, confusion matrix,
//! 6. [`pipeline`]: orchestration, persistence and prediction.
//!
//! ```no_run
//! use tweet_sentiment::pipeline::{PipelineConfig, train};
//!
//! let outcome = train(&PipelineConfig::default())?;
//! println!("{}", outcome.evaluation.report);
//! let emotion = outcome.predictor.predict("I am feeling very sad about the lockdown situation.")?;
//! println!("{emotion}");
//! # Ok::<(), tweet_sentiment::error::SentimentError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod data;
pub mod error;
pub mod ml;
pub mod pipeline;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
