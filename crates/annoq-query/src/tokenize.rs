//! The tokenization port.
//!
//! Span fragments list the phrase as the backend indexed it, so the translator needs the
//! backend's tokenizer. It never tokenizes on its own: callers inject an implementation of
//! [`Tokenize`].

use std::{rc::Rc, sync::Arc};

use thiserror::Error;

/// Error reported by a tokenizer implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TokenizeError {
    /// Error message.
    pub message: String,
}

impl TokenizeError {
    /// Creates a new tokenizer error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Splits a phrase into backend index tokens.
pub trait Tokenize {
    /// Returns the token texts of `text`, in order. Tokens are expected to be lower-case.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;
}

impl<T: Tokenize + ?Sized> Tokenize for &T {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenize + ?Sized> Tokenize for Box<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenize + ?Sized> Tokenize for Rc<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        (**self).tokenize(text)
    }
}

impl<T: Tokenize + ?Sized> Tokenize for Arc<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        (**self).tokenize(text)
    }
}

/// Splits on whitespace and lower-cases each piece.
///
/// Useful when the backend tokenizer is not available, e.g. for debug output.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenize for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(text.split_whitespace().map(str::to_lowercase).collect())
    }
}
