//! Text analysis for short social-media posts.
//!
//! This module turns raw post text into the token sequences the vectorizer
//! consumes. It follows a char filter → tokenizer → token filter design:
//!
//! ```text
//! Raw Text → TextNormalizer → TextLemmatizer → "content words joined by spaces"
//!              (char filters)    (tokenizer + filters)
//! ```

pub mod analyzer;
pub mod char_filter;
pub mod lemmatizer;
pub mod normalizer;
pub mod preprocessor;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
