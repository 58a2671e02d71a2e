//! Text normalizer for raw post text.
//!
//! Removes URLs, `@mentions` and every character that is not an ASCII letter
//! or whitespace, then lowercases what is left. Normalization never fails and
//! may return an empty string.
//!
//! # Examples
//!
//! ```
//! use tweet_sentiment::analysis::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new().unwrap();
//! let cleaned = normalizer.normalize("@PMO Stay SAFE!! https://t.co/x1 #COVID19");
//! assert_eq!(cleaned, " stay safe  covid");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Matches `http`/`https` links up to the next whitespace.
pub const URL_PATTERN: &str = r"http\S+";

/// Matches `@handle` mentions up to the next whitespace.
pub const MENTION_PATTERN: &str = r"@\S+";

/// Matches anything that is neither an ASCII letter nor whitespace.
pub const NON_ALPHA_PATTERN: &str = r"[^A-Za-z\s]";

/// Applies the cleaning char filters in a fixed order.
#[derive(Clone, Debug)]
pub struct TextNormalizer {
    analyzer: PipelineAnalyzer,
}

impl TextNormalizer {
    /// Create the normalizer with the URL, mention, non-alphabetic and
    /// lowercase filters.
    pub fn new() -> Result<Self> {
        // Links are removed before punctuation, so `ht.tps://...` survives as
        // a plain word.
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(URL_PATTERN, "")?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(MENTION_PATTERN, "")?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(NON_ALPHA_PATTERN, "")?))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .with_name("normalizer");

        Ok(TextNormalizer { analyzer })
    }

    /// Normalize raw text.
    pub fn normalize(&self, text: &str) -> String {
        self.analyzer.filter_text(text)
    }
}
