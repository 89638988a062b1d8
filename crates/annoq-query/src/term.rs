//! Scanned query terms.

use serde::Serialize;

use crate::field::FieldRef;

/// The phrase matching any annotation of a field's type.
pub const WILDCARD: &str = "*";

/// One term of a query: a key phrase with an optional field tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryTerm {
    /// Key phrase with escapes resolved, case preserved.
    pub phrase: String,
    /// Field tag, if any.
    pub field: Option<FieldRef>,
    /// Whether the phrase was written in double quotes.
    pub quoted: bool,
    /// Character position in the normalized query where the term starts.
    pub position: usize,
}

impl QueryTerm {
    /// Creates a term without a field tag.
    pub fn new(phrase: impl Into<String>, quoted: bool, position: usize) -> Self {
        Self {
            phrase: phrase.into(),
            field: None,
            quoted,
            position,
        }
    }

    /// Attaches a field tag.
    pub fn with_field(mut self, field: FieldRef) -> Self {
        self.field = Some(field);
        self
    }

    /// Returns true if the phrase is the wildcard `*`.
    pub fn is_wildcard(&self) -> bool {
        self.phrase == WILDCARD
    }
}
