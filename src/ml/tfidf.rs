//! TF-IDF vectorizer for text feature extraction.
//!
//! Documents are tokenized into words of two or more word characters and
//! lowercased. Fitting keeps the `max_features` most frequent terms of the
//! corpus (ties broken alphabetically), numbers them in alphabetical order and
//! computes the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`. Transforming weighs raw term counts by idf
//! and scales the row to unit L2 norm.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::{Result, SentimentError};
use crate::ml::sparse::{SparseMatrix, SparseVector};

/// Default cap on the vocabulary size.
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Everything a fitted vectorizer needs to be rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VectorizerState {
    max_features: usize,
    terms: Vec<String>,
    idf: Vec<f64>,
    n_documents: usize,
}

/// TF-IDF vectorizer for text feature extraction.
pub struct TfIdfVectorizer {
    /// Maximum number of terms kept by `fit`.
    max_features: usize,
    /// Vocabulary: term -> column index.
    vocabulary: HashMap<String, usize>,
    /// Terms in column order.
    terms: Vec<String>,
    /// Inverse document frequency for each column.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("max_features", &self.max_features)
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer with the default word analyzer.
    pub fn new(max_features: usize) -> Result<Self> {
        Ok(Self::with_analyzer(max_features, Self::default_analyzer()?))
    }

    /// Create an unfitted vectorizer with a custom analyzer.
    pub fn with_analyzer(max_features: usize, analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            max_features,
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Regex word tokenizer followed by lowercasing.
    pub fn default_analyzer() -> Result<Arc<dyn Analyzer>> {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("tfidf");
        Ok(Arc::new(analyzer))
    }

    /// Fit the vectorizer on training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if self.max_features == 0 {
            return Err(SentimentError::invalid_config(
                "max_features must be greater than zero",
            ));
        }

        let mut term_frequency: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = self.tokenize(doc)?;
            let unique_tokens: HashSet<&String> = tokens.iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
            }
            for token in tokens {
                *term_frequency.entry(token).or_insert(0) += 1;
            }
        }

        if term_frequency.is_empty() {
            return Err(SentimentError::model(
                "empty vocabulary: the documents contain no terms",
            ));
        }

        // Most frequent first, alphabetical among equals.
        let mut ranked: Vec<(String, usize)> = term_frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let dropped = ranked.len().saturating_sub(self.max_features);
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        self.terms = terms;
        self.idf = idf;
        self.n_documents = documents.len();

        info!(
            "Fitted TF-IDF vocabulary of {} terms over {} documents",
            self.terms.len(),
            self.n_documents
        );
        if dropped > 0 {
            debug!("Dropped {dropped} infrequent terms beyond max_features");
        }

        Ok(())
    }

    /// Transform a document into an L2-normalized TF-IDF row.
    ///
    /// The row always has `vocabulary_size()` columns. Unknown terms are
    /// ignored, so a document without known terms maps to the zero vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(SentimentError::model("vectorizer is not fitted"));
        }

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in self.tokenize(document)? {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut weights: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = weights.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut weights {
                *w /= norm;
            }
        }

        SparseVector::from_pairs(self.terms.len(), weights)
    }

    /// Transform every document into one row of a matrix.
    pub fn transform_all(&self, documents: &[String]) -> Result<SparseMatrix> {
        let rows = documents
            .iter()
            .map(|doc| self.transform(doc))
            .collect::<Result<Vec<_>>>()?;
        SparseMatrix::from_rows(self.terms.len(), rows)
    }

    /// Fit on the documents, then transform them.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<SparseMatrix> {
        self.fit(documents)?;
        self.transform_all(documents)
    }

    /// Tokenize a document using the configured analyzer.
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let tokens: Vec<String> = self.analyzer.analyze(text)?.map(|token| token.text).collect();
        Ok(tokens)
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Terms in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.terms
    }

    /// Column index of a term, if it is in the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Idf weights in column order.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    pub fn is_fitted(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Encode the fitted state. The analyzer is not stored; the default one
    /// is rebuilt by [`TfIdfVectorizer::from_bytes`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let state = VectorizerState {
            max_features: self.max_features,
            terms: self.terms.clone(),
            idf: self.idf.clone(),
            n_documents: self.n_documents,
        };
        Ok(bincode::serialize(&state)?)
    }

    /// Decode a vectorizer written by [`TfIdfVectorizer::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let state: VectorizerState = bincode::deserialize(bytes)?;
        if state.terms.len() != state.idf.len() {
            return Err(SentimentError::serialization(format!(
                "vectorizer has {} terms but {} idf weights",
                state.terms.len(),
                state.idf.len()
            )));
        }

        let mut vectorizer = Self::new(state.max_features)?;
        vectorizer.vocabulary = state
            .terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        vectorizer.terms = state.terms;
        vectorizer.idf = state.idf;
        vectorizer.n_documents = state.n_documents;
        Ok(vectorizer)
    }
}
