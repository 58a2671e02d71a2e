//! Statistical learning components.
//!
//! - [`tfidf`]: fixed-vocabulary TF-IDF vectorizer producing sparse rows.
//! - [`logistic`]: multinomial logistic regression fitted with [`lbfgs`].
//! - [`metrics`]: accuracy, confusion matrix and classification report.

pub mod classifier;
pub mod lbfgs;
pub mod logistic;
pub mod metrics;
pub mod sparse;
pub mod tfidf;

pub use classifier::Classifier;
pub use logistic::{LogisticRegression, LogisticRegressionConfig};
pub use metrics::{ClassificationReport, ConfusionMatrix, Evaluation, accuracy};
pub use sparse::{SparseMatrix, SparseVector};
pub use tfidf::TfIdfVectorizer;
