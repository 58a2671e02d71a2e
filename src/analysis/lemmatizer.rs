//! Stopword removal and lemmatization of normalized text.
//!
//! The text is split on whitespace, stopwords are dropped, every remaining
//! token is reduced to its lemma and the result is joined with single spaces.
//! Token order is preserved and duplicates are kept.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Whitespace tokenizer → stop filter → lemma filter → stop filter.
#[derive(Clone, Debug)]
pub struct TextLemmatizer {
    analyzer: PipelineAnalyzer,
}

impl TextLemmatizer {
    /// Create a lemmatizer using the English stopword list and the WordNet
    /// noun lemmatizer.
    pub fn new() -> Self {
        let stop_filter = Arc::new(StopFilter::new());

        // A lemma can itself be a stopword, so the list is applied on both sides.
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(stop_filter.clone())
            .add_filter(Arc::new(LemmaFilter::new()))
            .add_filter(stop_filter)
            .with_name("lemmatizer");

        TextLemmatizer { analyzer }
    }

    /// Lemmatize normalized text into space-separated content words.
    pub fn lemmatize(&self, text: &str) -> Result<String> {
        Ok(self.tokens(text)?.join(" "))
    }

    /// Lemmatize normalized text into its content words.
    pub fn tokens(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }
}

impl Default for TextLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}
