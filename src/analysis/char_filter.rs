//! Char filters that rewrite raw text before tokenization.
//!
//! # Available Filters
//!
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`lowercase::LowercaseCharFilter`] - Lowercases the whole text
//!
//! # Examples
//!
//! ```
//! use tweet_sentiment::analysis::char_filter::CharFilter;
//! use tweet_sentiment::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::new(r"@\S+", "").unwrap();
//! assert_eq!(filter.filter("hi @friend there"), "hi  there");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the rewritten text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;
