//! Error types for query translation.
//!
//! Every failure aborts the whole query. Errors carry the approximate character position
//! in the whitespace-normalized query where they were detected.

use std::{error::Error as StdError, fmt};

use thiserror::Error;

use crate::tokenize::TokenizeError;

/// The specific kind of translation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A `[` with no key phrase (or `*`) before it.
    #[error("field tag '[' must be preceded by a key phrase or an asterisk")]
    UnexpectedFieldTag,

    /// A backslash at the end of input or before a character that cannot be escaped.
    #[error("a backslash must be followed by a space, a double quote, a backslash, an asterisk, or a square bracket")]
    DanglingEscape {
        /// The character after the backslash, `None` at the end of input.
        found: Option<char>,
    },

    /// A field tag without its closing `]`.
    #[error("missing ']' to close the field tag")]
    UnterminatedFieldTag,

    /// A field tag with nothing between the brackets.
    #[error("empty field name")]
    EmptyFieldName,

    /// A quoted phrase still open at the end of input.
    #[error("unclosed quote")]
    UnterminatedQuote,

    /// A field name that is not in the registry.
    #[error("invalid field name '{name}', available fields: {available}")]
    InvalidFieldName {
        /// The offending name, lower-cased and without the concept id suffix.
        name: String,
        /// Comma-separated list of legal field names.
        available: String,
    },

    /// The wildcard used as a concept id.
    #[error("a concept id cannot be the wildcard '*'")]
    InvalidConceptWildcard,

    /// The injected tokenizer failed.
    #[error("tokenizer error: {0}")]
    TokenizerFailure(TokenizeError),
}

impl ErrorKind {
    /// Returns true for errors raised while scanning, before any field is looked up.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedFieldTag
                | Self::DanglingEscape { .. }
                | Self::UnterminatedFieldTag
                | Self::EmptyFieldName
                | Self::UnterminatedQuote
        )
    }
}

/// A failed translation.
///
/// Displays the message, the normalized query with a caret under the error position, and a
/// hint for common mistakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateError {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Approximate character position in the normalized query.
    pub position: usize,
    /// The normalized query (if available).
    pub query: Option<String>,
}

impl TranslateError {
    /// Creates an error without query context.
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        Self {
            kind,
            position,
            query: None,
        }
    }

    /// Sets the query string for this error.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns the error message without context.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            ErrorKind::UnexpectedFieldTag => {
                Some("Put a key phrase or '*' before the tag, e.g. 'brca1[Gene]' or '*[Gene]'")
            }
            ErrorKind::DanglingEscape { .. } => {
                Some("Write '\\\\' for a literal backslash")
            }
            ErrorKind::UnterminatedFieldTag => Some("Add a closing ']' to complete the field tag"),
            ErrorKind::EmptyFieldName => Some("Name a field inside the brackets, e.g. '[Gene]'"),
            ErrorKind::UnterminatedQuote => Some("Add a closing quote (\") to complete the phrase"),
            ErrorKind::InvalidConceptWildcard => {
                Some("Use '*[Field]' to match any annotation of that type")
            }
            ErrorKind::InvalidFieldName { .. } | ErrorKind::TokenizerFailure(_) => None,
        }
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.kind.is_syntax() {
            "query syntax error"
        } else {
            "query error"
        };

        writeln!(f, "{}: {}", prefix, self.kind)?;

        if let Some(query) = &self.query {
            writeln!(f, "  {}", query)?;
            let clamped = self.position.min(query.chars().count());
            writeln!(f, "  {}^", " ".repeat(clamped))?;
        }

        if let Some(suggestion) = self.suggestion() {
            write!(f, "hint: {}", suggestion)?;
        }

        Ok(())
    }
}

impl StdError for TranslateError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::TokenizerFailure(err) => Some(err),
            _ => None,
        }
    }
}
