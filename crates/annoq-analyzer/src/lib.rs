//! Backend tokenizer for span queries.
//!
//! Span fragments should list a phrase's tokens the way the backend indexed them. This crate
//! implements the [`Tokenize`] port with a tantivy analysis pipeline that approximates the
//! backend's text field. It is not an exact match: `SimpleTokenizer` splits on every
//! non-alphanumeric character, so `1.5` and `don't` become two tokens each, where a
//! standard-tokenizer backend keeps them whole. Callers needing parity inject their own
//! [`Tokenize`].
//!
//! Pipeline:
//! 1. `SimpleTokenizer` - splits text on whitespace and punctuation
//! 2. `LowerCaser` - normalizes tokens to lowercase
//! 3. `RemoveLongFilter` - drops tokens longer than the configured maximum

#![warn(missing_docs)]

use std::fmt;

use annoq_query::{Tokenize, TokenizeError};
use tantivy::tokenizer::{LowerCaser, RemoveLongFilter, SimpleTokenizer, TextAnalyzer, TokenStream};
use thiserror::Error;
use tracing::debug;

/// Default maximum token length in bytes, matching the backend's tokenizer.
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 128;

/// Errors building the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    /// A zero maximum token length would drop every token.
    #[error("max_token_length must be at least 1, got {0}")]
    InvalidMaxTokenLength(usize),
}

/// Builds the analysis pipeline.
///
/// Tokens longer than `max_token_length` bytes are removed.
pub fn build_analyzer(max_token_length: usize) -> Result<TextAnalyzer, AnalyzerError> {
    if max_token_length == 0 {
        return Err(AnalyzerError::InvalidMaxTokenLength(max_token_length));
    }
    debug!(max_token_length, "building analyzer");
    Ok(pipeline(max_token_length))
}

/// Assembles the pipeline without validating the limit.
fn pipeline(max_token_length: usize) -> TextAnalyzer {
    // RemoveLongFilter keeps tokens strictly shorter than its limit.
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(max_token_length + 1))
        .build()
}

/// [`Tokenize`] implementation backed by a tantivy analyzer.
#[derive(Clone)]
pub struct BackendTokenizer {
    /// Template analyzer; cloned for each call.
    analyzer: TextAnalyzer,
    /// Maximum token length in bytes.
    max_token_length: usize,
}

impl BackendTokenizer {
    /// Creates a tokenizer dropping tokens longer than `max_token_length` bytes.
    pub fn new(max_token_length: usize) -> Result<Self, AnalyzerError> {
        Ok(Self {
            analyzer: build_analyzer(max_token_length)?,
            max_token_length,
        })
    }

    /// Maximum token length in bytes.
    pub fn max_token_length(&self) -> usize {
        self.max_token_length
    }
}

impl Default for BackendTokenizer {
    fn default() -> Self {
        Self {
            analyzer: pipeline(DEFAULT_MAX_TOKEN_LENGTH),
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
        }
    }
}

impl fmt::Debug for BackendTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendTokenizer")
            .field("max_token_length", &self.max_token_length)
            .finish_non_exhaustive()
    }
}

impl Tokenize for BackendTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while stream.advance() {
            tokens.push(stream.token().text.clone());
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod test {
    use annoq_query::{Translator, TranslatorConfig};

    use super::*;

    /// Tokenizes with the default settings.
    fn tokens(text: &str) -> Vec<String> {
        BackendTokenizer::default().tokenize(text).unwrap()
    }

    #[test]
    fn analyzer_lowercases() {
        let mut analyzer = build_analyzer(DEFAULT_MAX_TOKEN_LENGTH).unwrap();
        let mut stream = analyzer.token_stream("HELLO World");

        let token = stream.next().unwrap();
        assert_eq!(token.text, "hello");

        let token = stream.next().unwrap();
        assert_eq!(token.text, "world");

        assert!(stream.next().is_none());
    }

    #[test]
    fn splits_on_punctuation() {
        assert_eq!(tokens("her2-positive, cancer."), vec!["her2", "positive", "cancer"]);
    }

    #[test]
    fn splits_decimals_and_contractions() {
        assert_eq!(tokens("1.5 don't"), vec!["1", "5", "don", "t"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens(" -- ").is_empty());
    }

    #[test]
    fn long_tokens_removed() {
        let tokenizer = BackendTokenizer::new(4).unwrap();
        assert_eq!(tokenizer.tokenize("abcd abcde ab").unwrap(), vec!["abcd", "ab"]);
        assert_eq!(tokenizer.max_token_length(), 4);
    }

    #[test]
    fn default_limit_keeps_128_bytes() {
        let at_limit = "a".repeat(DEFAULT_MAX_TOKEN_LENGTH);
        let over_limit = "b".repeat(DEFAULT_MAX_TOKEN_LENGTH + 1);
        assert_eq!(tokens(&format!("{at_limit} {over_limit}")), vec![at_limit]);
    }

    #[test]
    fn zero_limit_rejected() {
        let err = BackendTokenizer::new(0).unwrap_err();
        assert_eq!(err, AnalyzerError::InvalidMaxTokenLength(0));
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn repeated_calls_are_independent() {
        let tokenizer = BackendTokenizer::default();
        assert_eq!(tokenizer.tokenize("one two").unwrap(), vec!["one", "two"]);
        assert_eq!(tokenizer.tokenize("three").unwrap(), vec!["three"]);
    }

    #[test]
    fn drives_span_fragments() {
        let translator =
            Translator::with_config(TranslatorConfig::default(), BackendTokenizer::default());
        assert_eq!(
            translator.translate("\"HER2-positive\"[Disease]").unwrap(),
            "_query_:\"{!annographix ver=3 span=17} @0:concept_disease ~1:her2 #covers(0,1) ~2:positive #covers(0,2)\""
        );
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BackendTokenizer>();
    }
}
