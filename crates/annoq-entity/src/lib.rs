//! Entity descriptions attached to annotated search results.
//!
//! A result record lists the annotations it matched, one per line:
//!
//! ```text
//! <start>\t<end>\t<concept type>\t<concept ids>
//! ```
//!
//! Concept ids are separated by `|` or `,`. Empty lines are skipped.

#![warn(missing_docs)]

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors parsing an entity description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// A line without exactly four columns.
    #[error("line {line}: expected 4 tab-separated fields, found {found}")]
    ColumnCount {
        /// 1-based line number.
        line: usize,
        /// Number of fields on the line.
        found: usize,
    },

    /// A start or end offset that is not a non-negative integer.
    #[error("line {line}: cannot parse {which} offset '{value}' (not a non-negative integer)")]
    InvalidOffset {
        /// 1-based line number.
        line: usize,
        /// `"start"` or `"end"`.
        which: &'static str,
        /// The offending text.
        value: String,
    },
}

impl EntityError {
    /// The 1-based line number of the failing entry.
    pub fn line(&self) -> usize {
        match self {
            Self::ColumnCount { line, .. } | Self::InvalidOffset { line, .. } => *line,
        }
    }
}

/// One annotation of a search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityEntry {
    /// Start offset.
    pub start: usize,
    /// End offset.
    pub end: usize,
    /// Concept type, e.g. `Gene`.
    pub concept: String,
    /// Concept identifiers, in order, without empty pieces.
    pub concept_ids: Vec<String>,
}

impl EntityEntry {
    /// Parses one non-empty line.
    fn parse_line(line: &str, line_no: usize) -> Result<Self, EntityError> {
        let fields: Vec<&str> = line.split('\t').collect();
        let [start, end, concept, ids] = fields[..] else {
            return Err(EntityError::ColumnCount {
                line: line_no,
                found: fields.len(),
            });
        };

        Ok(Self {
            start: parse_offset(start, "start", line_no)?,
            end: parse_offset(end, "end", line_no)?,
            concept: concept.to_string(),
            concept_ids: ids
                .split(['|', ','])
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect(),
        })
    }
}

impl fmt::Display for EntityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {}] concept={} concept_ids={}",
            self.start,
            self.end,
            self.concept,
            self.concept_ids.join(",")
        )
    }
}

/// Parses an offset column.
fn parse_offset(value: &str, which: &'static str, line: usize) -> Result<usize, EntityError> {
    value.parse().map_err(|_| EntityError::InvalidOffset {
        line,
        which,
        value: value.to_string(),
    })
}

/// Parses a newline-separated entity description.
///
/// Both `\n` and `\r\n` line endings are accepted. Parsing stops at the first malformed line.
pub fn parse_entity_desc(desc: &str) -> Result<Vec<EntityEntry>, EntityError> {
    let entries = desc
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| EntityEntry::parse_line(line, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = entries.len(), "parsed entity description");
    Ok(entries)
}
