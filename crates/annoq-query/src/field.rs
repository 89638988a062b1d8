//! Field names and the backend's annotation markers.
//!
//! A field tag names an annotation type. `[Gene]` selects annotations of that type and
//! `[Gene_id]` selects annotations by concept identifier. The backend indexes both as
//! prefixed terms: `concept_gene` and `conceptid_<id>`.

use std::{collections::HashSet, fmt};

use serde::Serialize;

/// Prefix of the term marking an annotation's concept type.
pub const CONCEPT_PREFIX: &str = "concept";

/// Prefix of the term carrying an annotation's concept identifier.
pub const CONCEPT_ID_PREFIX: &str = "conceptid";

/// Backend field holding annotation terms.
pub const ANNOTATION_FIELD: &str = "Annotation";

/// Field-name suffix selecting a concept identifier lookup.
pub const CONCEPT_ID_SUFFIX: &str = "_id";

/// Annotation types known to the backend.
pub const DEFAULT_FIELDS: &[&str] = &[
    "Chemical",
    "Disease",
    "DNAMutation",
    "Gene",
    "ProteinMutation",
    "SNP",
    "Species",
];

/// A field tag, lower-cased, with the concept id suffix resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum FieldRef {
    /// `[Field]`: an annotation of this type.
    Concept(String),
    /// `[Field_id]`: an annotation of this type carrying a concept id.
    ConceptId(String),
}

impl FieldRef {
    /// Parses the text between the brackets of a field tag.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        match lower.strip_suffix(CONCEPT_ID_SUFFIX) {
            Some(base) => Self::ConceptId(base.to_string()),
            None => Self::Concept(lower),
        }
    }

    /// The annotation type name, without suffix.
    pub fn name(&self) -> &str {
        match self {
            Self::Concept(name) | Self::ConceptId(name) => name,
        }
    }

    /// Returns true for `[Field_id]` tags.
    pub fn is_concept_id(&self) -> bool {
        matches!(self, Self::ConceptId(_))
    }

    /// The tag as typed, lower-cased (`gene`, `snp_id`).
    pub fn label(&self) -> String {
        match self {
            Self::Concept(name) => name.clone(),
            Self::ConceptId(name) => format!("{name}{CONCEPT_ID_SUFFIX}"),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The set of legal field names, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    /// Names in declaration order, as given.
    names: Vec<String>,
    /// Lower-cased names for lookup.
    lookup: HashSet<String>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_FIELDS.iter().copied())
    }
}

impl FieldRegistry {
    /// Creates a registry from field names. Empty and duplicate names are skipped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self {
            names: Vec::new(),
            lookup: HashSet::new(),
        };
        for name in names {
            let name = name.into();
            if !name.is_empty() && registry.lookup.insert(name.to_lowercase()) {
                registry.names.push(name);
            }
        }
        registry
    }

    /// Returns true if `name` is a legal field name, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(&name.to_lowercase())
    }

    /// Iterates over field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no field is registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Lower-cased, comma-joined field names for error messages.
    pub fn listing(&self) -> String {
        self.names
            .iter()
            .map(|name| name.to_lowercase())
            .collect::<Vec<_>>()
            .join(",")
    }
}
