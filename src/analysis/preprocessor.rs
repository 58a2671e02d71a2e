//! Normalization followed by lemmatization, shared by training and prediction.

use crate::analysis::lemmatizer::TextLemmatizer;
use crate::analysis::normalizer::TextNormalizer;
use crate::error::Result;

/// The derived text fields of one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText {
    /// Output of the normalizer.
    pub cleaned: String,
    /// Output of the lemmatizer, fed to the vectorizer.
    pub lemmatized: String,
}

/// Turns raw post text into vectorizer input.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    normalizer: TextNormalizer,
    lemmatizer: TextLemmatizer,
}

impl Preprocessor {
    /// Create a preprocessor with the default normalizer and lemmatizer.
    pub fn new() -> Result<Self> {
        Ok(Preprocessor {
            normalizer: TextNormalizer::new()?,
            lemmatizer: TextLemmatizer::new(),
        })
    }

    /// Normalize and lemmatize one text, keeping both derived fields.
    pub fn prepare(&self, text: &str) -> Result<PreparedText> {
        let cleaned = self.normalizer.normalize(text);
        let lemmatized = self.lemmatizer.lemmatize(&cleaned)?;
        Ok(PreparedText {
            cleaned,
            lemmatized,
        })
    }

    /// Normalize and lemmatize one text, returning only vectorizer input.
    pub fn preprocess(&self, text: &str) -> Result<String> {
        Ok(self.prepare(text)?.lemmatized)
    }

    /// Preprocess every text of a corpus.
    pub fn preprocess_all<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<String>> {
        texts.iter().map(|t| self.preprocess(t.as_ref())).collect()
    }
}
