//! Backend query fragments.
//!
//! One [`Fragment`] is synthesized per query term. Its `Display` is the exact text the
//! backend parses.

use std::fmt;

use serde::Serialize;

use crate::field::{ANNOTATION_FIELD, CONCEPT_ID_PREFIX, CONCEPT_PREFIX};

/// Backend text for one query term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    /// A bare key phrase, passed through to the default search field.
    Literal {
        /// Lower-cased phrase.
        text: String,
        /// Whether the phrase was quoted in the query.
        quoted: bool,
    },
    /// `*[Field]`: any annotation of the field's type.
    Existence {
        /// Lower-cased field name.
        field: String,
    },
    /// `id[Field_id]`: an annotation of the field's type carrying the concept id.
    ConceptId {
        /// Lower-cased field name, without suffix.
        field: String,
        /// Lower-cased concept id.
        id: String,
    },
    /// `phrase[Field]`: an annotation of the field's type covering the phrase's tokens.
    Span {
        /// Lower-cased field name.
        field: String,
        /// Maximum span width.
        window: usize,
        /// Backend tokens of the phrase.
        tokens: Vec<String>,
    },
    /// Debug rendering of a term, with no backend syntax.
    Debug {
        /// Lower-cased phrase.
        phrase: String,
        /// Field label, if any.
        field: Option<String>,
        /// Whether the phrase was quoted in the query.
        quoted: bool,
    },
}

impl Fragment {
    /// Short name of the fragment kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "literal",
            Self::Existence { .. } => "existence",
            Self::ConceptId { .. } => "concept_id",
            Self::Span { .. } => "span",
            Self::Debug { .. } => "debug",
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { text, quoted: true } => write!(f, "\"{text}\""),
            Self::Literal { text, quoted: false } => f.write_str(text),
            Self::Existence { field } => {
                write!(f, "{ANNOTATION_FIELD}:{CONCEPT_PREFIX}_{field}")
            }
            Self::ConceptId { field, id } => write!(
                f,
                "_query_:\"{{!annographix ver=3}} @0:{CONCEPT_PREFIX}_{field} @1:{CONCEPT_ID_PREFIX}_{id} #covers(0,1)\""
            ),
            Self::Span {
                field,
                window,
                tokens,
            } => {
                write!(
                    f,
                    "_query_:\"{{!annographix ver=3 span={window}}} @0:{CONCEPT_PREFIX}_{field}"
                )?;
                for (i, token) in tokens.iter().enumerate() {
                    let k = i + 1;
                    write!(f, " ~{k}:{token} #covers(0,{k})")?;
                }
                f.write_str("\"")
            }
            Self::Debug {
                phrase,
                field,
                quoted,
            } => {
                let phrase = if phrase.is_empty() { "*" } else { phrase };
                let quote = if *quoted { "\"" } else { "" };
                let field = field.as_deref().unwrap_or("NONE");
                write!(f, "{quote}{phrase}{quote}:{field}")
            }
        }
    }
}
