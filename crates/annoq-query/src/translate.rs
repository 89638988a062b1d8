//! Query translation: scan, synthesize, join.

use std::{fmt, str};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::TranslateError,
    field::FieldRegistry,
    fragment::Fragment,
    scanner::{normalize_whitespace, scan},
    synth::Synthesizer,
    term::QueryTerm,
    tokenize::Tokenize,
};

/// Slack added to a span window per phrase token.
pub const SPAN_PADDING: usize = 2;

/// Boolean operator joining term fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinOperator {
    /// Every term must match.
    #[serde(alias = "AND")]
    And,
    /// Any term may match.
    #[default]
    #[serde(alias = "OR")]
    Or,
}

impl JoinOperator {
    /// The operator as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for JoinOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            _ => Err(format!("unknown operator '{}', expected one of: and, or", s)),
        }
    }
}

/// Translation options.
///
/// The span window padding is fixed at [`SPAN_PADDING`] and is not configurable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Operator joining term fragments.
    pub operator: JoinOperator,
    /// Render `phrase:field` pairs instead of backend syntax.
    pub debug: bool,
}

impl TranslatorConfig {
    /// Sets the join operator.
    pub fn with_operator(mut self, operator: JoinOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Enables or disables debug rendering.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// The full result of translating one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// The whitespace-normalized input.
    pub input: String,
    /// Scanned terms, in query order.
    pub terms: Vec<QueryTerm>,
    /// One fragment per term.
    pub fragments: Vec<Fragment>,
    /// The joined backend query.
    pub query: String,
}

/// Translates keyword queries into backend query strings.
///
/// Holds only read-only state, so a translator can be shared across threads when its
/// tokenizer can.
#[derive(Debug, Clone)]
pub struct Translator<T> {
    /// Legal field names.
    registry: FieldRegistry,
    /// Rendering options.
    config: TranslatorConfig,
    /// Backend tokenizer.
    tokenizer: T,
}

impl<T: Tokenize> Translator<T> {
    /// Creates a translator with the default fields and options.
    pub fn new(tokenizer: T) -> Self {
        Self::with_config(TranslatorConfig::default(), tokenizer)
    }

    /// Creates a translator with the default fields and the given options.
    pub fn with_config(config: TranslatorConfig, tokenizer: T) -> Self {
        Self {
            registry: FieldRegistry::default(),
            config,
            tokenizer,
        }
    }

    /// Replaces the field registry.
    pub fn with_registry(mut self, registry: FieldRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The translation options.
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// The legal field names.
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Translates `query`, keeping the intermediate terms and fragments.
    ///
    /// Any error aborts the whole query; no partial result is returned.
    pub fn run(&self, query: &str) -> Result<Translation, TranslateError> {
        let input = normalize_whitespace(query);
        let terms = scan(&input)?;

        let synthesizer = Synthesizer::new(&self.registry, &self.config, &self.tokenizer);
        let fragments = terms
            .iter()
            .map(|term| synthesizer.synthesize(term))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| err.with_query(input.clone()))?;

        for fragment in &fragments {
            debug!(kind = fragment.kind(), %fragment, "synthesized fragment");
        }

        let separator = format!(" {} ", self.config.operator);
        let query = fragments
            .iter()
            .map(Fragment::to_string)
            .collect::<Vec<_>>()
            .join(&separator);

        Ok(Translation {
            input,
            terms,
            fragments,
            query,
        })
    }

    /// Translates `query` into a backend query string.
    pub fn translate(&self, query: &str) -> Result<String, TranslateError> {
        self.run(query).map(|translation| translation.query)
    }

    /// Translates `query` into its per-term fragments.
    pub fn fragments(&self, query: &str) -> Result<Vec<Fragment>, TranslateError> {
        self.run(query).map(|translation| translation.fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, tokenize::WhitespaceTokenizer};

    /// Translator with default options.
    fn translator() -> Translator<WhitespaceTokenizer> {
        Translator::new(WhitespaceTokenizer)
    }

    #[test]
    fn operator_parsing() {
        assert_eq!("AND".parse::<JoinOperator>().unwrap(), JoinOperator::And);
        assert_eq!("or".parse::<JoinOperator>().unwrap(), JoinOperator::Or);
        let err = "xor".parse::<JoinOperator>().unwrap_err();
        assert!(err.contains("unknown operator 'xor'"));
    }

    #[test]
    fn operator_defaults_to_or() {
        assert_eq!(TranslatorConfig::default().operator, JoinOperator::Or);
        assert!(!TranslatorConfig::default().debug);
    }

    #[test]
    fn empty_query_is_empty() {
        assert_eq!(translator().translate("").unwrap(), "");
        assert_eq!(translator().translate(" \t\n").unwrap(), "");
    }

    #[test]
    fn plain_terms_joined_with_or() {
        assert_eq!(
            translator().translate("Breast \"Lung Cancer\"").unwrap(),
            "breast OR \"lung cancer\""
        );
    }

    #[test]
    fn terms_joined_with_and() {
        let translator = Translator::with_config(
            TranslatorConfig::default().with_operator(JoinOperator::And),
            WhitespaceTokenizer,
        );
        assert_eq!(
            translator.translate("*[Gene] *[Disease]").unwrap(),
            "Annotation:concept_gene AND Annotation:concept_disease"
        );
    }

    #[test]
    fn run_keeps_intermediate_results() {
        let translation = translator().run("a   *[Gene]").unwrap();
        assert_eq!(translation.input, "a *[Gene]");
        assert_eq!(translation.terms.len(), 2);
        assert_eq!(translation.fragments[1].kind(), "existence");
        assert_eq!(translation.query, "a OR Annotation:concept_gene");
    }

    #[test]
    fn synthesis_error_carries_query() {
        let err = translator().translate("ok  foo[Bogus]").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidFieldName { .. }));
        assert_eq!(err.query.as_deref(), Some("ok foo[Bogus]"));
        assert_eq!(err.position, 3);
    }

    #[test]
    fn custom_registry() {
        let translator = translator().with_registry(FieldRegistry::new(["Cell"]));
        assert_eq!(
            translator.translate("*[cell]").unwrap(),
            "Annotation:concept_cell"
        );
        assert!(translator.translate("*[Gene]").is_err());
        assert_eq!(translator.registry().listing(), "cell");
    }

    #[test]
    fn debug_mode() {
        let translator = Translator::with_config(
            TranslatorConfig::default().with_debug(true),
            WhitespaceTokenizer,
        );
        assert!(translator.config().debug);
        assert_eq!(
            translator.translate("Foo[Gene] \"a b\"").unwrap(),
            "foo:gene OR \"a b\":NONE"
        );
    }

    #[test]
    fn fragments_only() {
        let fragments = translator().fragments("x y").unwrap();
        assert_eq!(fragments.len(), 2);
    }
}
