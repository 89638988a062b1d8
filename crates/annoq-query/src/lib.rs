//! Translation of Pubmed-style keyword queries into annotation span queries.
//!
//! The input language is a list of space-separated terms:
//!
//! - **Phrases**: `brca1`, `"breast cancer"` - matched as literal text
//! - **Typed phrases**: `"breast cancer"[Disease]` - text inside an annotation of that type
//! - **Wildcards**: `*[Gene]` - any annotation of that type
//! - **Concept ids**: `rs123[SNP_id]` - an annotation carrying that concept identifier
//! - **Escapes**: `\ `, `\"`, `\[`, `\]`, `\*`, `\\` inside a phrase
//!
//! Each term becomes one backend fragment and the fragments are joined with `AND`
//! or `OR`.
//!
//! # Example
//!
//! ```
//! use annoq_query::{Translator, WhitespaceTokenizer};
//!
//! let translator = Translator::new(WhitespaceTokenizer);
//! let query = translator.translate("*[Gene] rs123[SNP_id]").unwrap();
//! assert_eq!(
//!     query,
//!     "Annotation:concept_gene OR \
//!      _query_:\"{!annographix ver=3} @0:concept_snp @1:conceptid_rs123 #covers(0,1)\""
//! );
//! ```

#![warn(missing_docs)]

mod error;
mod field;
mod fragment;
mod scanner;
mod synth;
mod term;
mod tokenize;
mod translate;

pub use error::{ErrorKind, TranslateError};
pub use field::{
    ANNOTATION_FIELD, CONCEPT_ID_PREFIX, CONCEPT_ID_SUFFIX, CONCEPT_PREFIX, DEFAULT_FIELDS,
    FieldRef, FieldRegistry,
};
pub use fragment::Fragment;
pub use scanner::{Action, Delimiter, State, Symbol, normalize_whitespace, scan, transition};
pub use synth::Synthesizer;
pub use term::{QueryTerm, WILDCARD};
pub use tokenize::{Tokenize, TokenizeError, WhitespaceTokenizer};
pub use translate::{JoinOperator, SPAN_PADDING, Translation, Translator, TranslatorConfig};

/// Translates a query with the default configuration (`OR`, no debug rendering).
pub fn translate<T: Tokenize + ?Sized>(query: &str, tokenizer: &T) -> Result<String, TranslateError> {
    Translator::new(tokenizer).translate(query)
}
