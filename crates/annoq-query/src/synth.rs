//! Per-term fragment synthesis.

use tracing::trace;

use crate::{
    error::{ErrorKind, TranslateError},
    field::{FieldRef, FieldRegistry},
    fragment::Fragment,
    term::{QueryTerm, WILDCARD},
    tokenize::Tokenize,
    translate::{SPAN_PADDING, TranslatorConfig},
};

/// Turns scanned terms into backend fragments.
///
/// Borrows everything it needs, so one synthesizer can serve any number of terms.
pub struct Synthesizer<'a, T: Tokenize + ?Sized> {
    /// Legal field names.
    registry: &'a FieldRegistry,
    /// Rendering options.
    config: &'a TranslatorConfig,
    /// Backend tokenizer for span fragments.
    tokenizer: &'a T,
}

impl<'a, T: Tokenize + ?Sized> Synthesizer<'a, T> {
    /// Creates a synthesizer.
    pub fn new(registry: &'a FieldRegistry, config: &'a TranslatorConfig, tokenizer: &'a T) -> Self {
        Self {
            registry,
            config,
            tokenizer,
        }
    }

    /// Synthesizes the fragment for one term.
    ///
    /// Errors carry the term's position but no query text.
    pub fn synthesize(&self, term: &QueryTerm) -> Result<Fragment, TranslateError> {
        let phrase = term.phrase.to_lowercase();
        let fail = |kind| Err(TranslateError::new(kind, term.position));

        if self.config.debug {
            return Ok(Fragment::Debug {
                phrase,
                field: term.field.as_ref().map(FieldRef::label),
                quoted: term.quoted,
            });
        }

        let Some(field) = &term.field else {
            return Ok(Fragment::Literal {
                text: phrase,
                quoted: term.quoted,
            });
        };

        let name = field.name();
        if !self.registry.contains(name) {
            return fail(ErrorKind::InvalidFieldName {
                name: name.to_string(),
                available: self.registry.listing(),
            });
        }

        match field {
            FieldRef::ConceptId(_) if phrase == WILDCARD => fail(ErrorKind::InvalidConceptWildcard),
            FieldRef::ConceptId(_) => Ok(Fragment::ConceptId {
                field: name.to_string(),
                id: phrase,
            }),
            FieldRef::Concept(_) if phrase == WILDCARD => Ok(Fragment::Existence {
                field: name.to_string(),
            }),
            FieldRef::Concept(_) => {
                debug_assert!(!name.is_empty(), "span fragment without a field name");
                let tokens = self.tokenizer.tokenize(&phrase).map_err(|err| {
                    TranslateError::new(ErrorKind::TokenizerFailure(err), term.position)
                })?;
                let window = phrase.chars().count() + SPAN_PADDING * tokens.len();
                trace!(%phrase, ?tokens, window, "span fragment");
                Ok(Fragment::Span {
                    field: name.to_string(),
                    window,
                    tokens,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::{TokenizeError, WhitespaceTokenizer};

    /// Tokenizer that always fails.
    struct Broken;

    impl Tokenize for Broken {
        fn tokenize(&self, _text: &str) -> Result<Vec<String>, TokenizeError> {
            Err(TokenizeError::new("no analyzer"))
        }
    }

    /// Synthesizes one term with the default registry.
    fn synth(term: &QueryTerm, config: &TranslatorConfig) -> Result<Fragment, TranslateError> {
        let registry = FieldRegistry::default();
        Synthesizer::new(&registry, config, &WhitespaceTokenizer).synthesize(term)
    }

    /// A term tagged with `field`.
    fn term(phrase: &str, field: &str) -> QueryTerm {
        QueryTerm::new(phrase, false, 0).with_field(FieldRef::parse(field))
    }

    #[test]
    fn literal_is_lowercased() {
        let fragment = synth(&QueryTerm::new("BRCA1", false, 0), &TranslatorConfig::default());
        assert_eq!(
            fragment.unwrap(),
            Fragment::Literal {
                text: "brca1".into(),
                quoted: false
            }
        );
    }

    #[test]
    fn empty_phrase_with_field_is_a_span() {
        let fragment = synth(&term("", "Gene"), &TranslatorConfig::default()).unwrap();
        assert_eq!(
            fragment,
            Fragment::Span {
                field: "gene".into(),
                window: 0,
                tokens: Vec::new()
            }
        );
    }

    #[test]
    fn span_window_counts_chars_and_tokens() {
        let fragment = synth(&term("Breast Cancer", "Disease"), &TranslatorConfig::default());
        assert_eq!(
            fragment.unwrap(),
            Fragment::Span {
                field: "disease".into(),
                window: 13 + 2 * 2,
                tokens: vec!["breast".into(), "cancer".into()]
            }
        );
    }

    #[test]
    fn span_window_padding_is_fixed() {
        match synth(&term("foo", "Species"), &TranslatorConfig::default()).unwrap() {
            Fragment::Span { window, .. } => assert_eq!(window, 3 + SPAN_PADDING),
            other => panic!("expected span, got {other:?}"),
        }
    }

    #[test]
    fn span_window_counts_scalar_values_outside_bmp() {
        // U+1D4D0 is one char but two UTF-16 units.
        match synth(&term("\u{1d4d0}x", "Gene"), &TranslatorConfig::default()).unwrap() {
            Fragment::Span { window, tokens, .. } => {
                assert_eq!(tokens, vec!["\u{1d4d0}x"]);
                assert_eq!(window, 2 + SPAN_PADDING);
            }
            other => panic!("expected span, got {other:?}"),
        }
    }

    #[test]
    fn wildcard_is_existence() {
        assert_eq!(
            synth(&term("*", "GENE"), &TranslatorConfig::default()).unwrap(),
            Fragment::Existence {
                field: "gene".into()
            }
        );
    }

    #[test]
    fn concept_id() {
        assert_eq!(
            synth(&term("RS123", "SNP_id"), &TranslatorConfig::default()).unwrap(),
            Fragment::ConceptId {
                field: "snp".into(),
                id: "rs123".into()
            }
        );
    }

    #[test]
    fn concept_id_wildcard_fails() {
        let err = synth(&term("*", "Gene_id"), &TranslatorConfig::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidConceptWildcard);
    }

    #[test]
    fn unknown_field_fails_before_wildcard_check() {
        let err = synth(&term("*", "Bogus_id"), &TranslatorConfig::default()).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::InvalidFieldName {
                name: "bogus".into(),
                available: FieldRegistry::default().listing()
            }
        );
    }

    #[test]
    fn tokenizer_failure_is_wrapped() {
        let registry = FieldRegistry::default();
        let config = TranslatorConfig::default();
        let term = QueryTerm::new("foo", false, 9).with_field(FieldRef::parse("Gene"));
        let err = Synthesizer::new(&registry, &config, &Broken)
            .synthesize(&term)
            .unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::TokenizerFailure(TokenizeError::new("no analyzer"))
        );
        assert_eq!(err.position, 9);
    }

    #[test]
    fn debug_skips_registry() {
        let config = TranslatorConfig::default().with_debug(true);
        assert_eq!(
            synth(&term("Foo", "Bogus_ID"), &config).unwrap().to_string(),
            "foo:bogus_id"
        );
        assert_eq!(
            synth(&QueryTerm::new("", true, 0), &config).unwrap().to_string(),
            "\"*\":NONE"
        );
    }

    #[test]
    fn debug_keeps_concept_id_wildcard() {
        let config = TranslatorConfig::default().with_debug(true);
        assert_eq!(
            synth(&term("*", "Gene_id"), &config).unwrap().to_string(),
            "*:gene_id"
        );
    }
}
