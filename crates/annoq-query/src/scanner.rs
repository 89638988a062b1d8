//! Query scanner.
//!
//! Segments a query into [`QueryTerm`]s. The scanner is a finite-state machine:
//! [`transition`] is a pure function of the current state and the next input symbol, and
//! the driver in this module owns the phrase and field buffers.
//!
//! Input is whitespace-normalized first, then fed character by character, followed by a
//! [`Symbol::Sentinel`] (read as a trailing space, so a final unquoted phrase terminates the
//! same way as any other) and a final [`Symbol::End`].
//!
//! # States
//!
//! ```text
//! Init ──'"'──▶ Phrase(Quote) ──'"'──▶ AfterPhrase ──'['──▶ FieldName ──']'──▶ Init
//!   │                  ▲   │                │
//!   └──other──▶ Phrase(Space)  '\\'▶ Escape  └──other──▶ Init (emit)
//! ```

use std::mem;

use tracing::{debug, trace};

use crate::{
    error::{ErrorKind, TranslateError},
    field::FieldRef,
    term::QueryTerm,
};

/// Characters a backslash may escape inside a phrase.
const ESCAPABLE: [char; 6] = [' ', '"', '[', '*', '\\', ']'];

/// The character that closes the phrase being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Unquoted phrase, closed by a space.
    Space,
    /// Quoted phrase, closed by a double quote.
    Quote,
}

impl Delimiter {
    /// Returns true if `ch` closes a phrase with this delimiter.
    fn closes(self, ch: char) -> bool {
        match self {
            Self::Space => ch == ' ',
            Self::Quote => ch == '"',
        }
    }

    /// Whether phrases with this delimiter were quoted.
    pub fn is_quoted(self) -> bool {
        self == Self::Quote
    }
}

/// One input symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// A character of the normalized query.
    Char(char),
    /// The trailing space appended to the query.
    Sentinel,
    /// End of input.
    End,
}

impl Symbol {
    /// The character this symbol reads as. The sentinel reads as a space.
    fn as_char(self) -> Option<char> {
        match self {
            Self::Char(ch) => Some(ch),
            Self::Sentinel => Some(' '),
            Self::End => None,
        }
    }
}

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Between terms.
    Init,
    /// Reading a key phrase.
    Phrase(Delimiter),
    /// Just read a backslash inside a phrase.
    Escape(Delimiter),
    /// Phrase closed; skipping spaces while looking for a field tag.
    AfterPhrase(Delimiter),
    /// Inside `[...]`.
    FieldName {
        /// Delimiter of the phrase the tag belongs to.
        delimiter: Delimiter,
        /// No field character read yet.
        empty: bool,
    },
}

/// What the driver does with the current symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consume the symbol.
    Skip,
    /// Keep the symbol for the next state.
    Hold,
    /// Consume the symbol and append a character to the key phrase.
    PushPhrase(char),
    /// Consume the symbol and append a character to the field name.
    PushField(char),
    /// Emit the pending term without a field. The symbol is kept.
    Emit(Delimiter),
    /// Consume the closing `]` and emit the pending term with its field.
    EmitWithField(Delimiter),
}

/// Computes the next state and action for `symbol` read at `position`.
pub fn transition(
    state: State,
    symbol: Symbol,
    position: usize,
) -> Result<(State, Action), TranslateError> {
    let fail = |kind| Err(TranslateError::new(kind, position));

    match state {
        State::Init => match symbol.as_char() {
            None | Some(' ') => Ok((State::Init, Action::Skip)),
            Some('"') => Ok((State::Phrase(Delimiter::Quote), Action::Skip)),
            Some('[') => fail(ErrorKind::UnexpectedFieldTag),
            Some(_) => Ok((State::Phrase(Delimiter::Space), Action::Hold)),
        },

        State::Phrase(delimiter) => match symbol.as_char() {
            None if delimiter.is_quoted() => fail(ErrorKind::UnterminatedQuote),
            None => Ok((State::Init, Action::Emit(delimiter))),
            Some('\\') => Ok((State::Escape(delimiter), Action::Skip)),
            Some(ch) if delimiter.closes(ch) => Ok((State::AfterPhrase(delimiter), Action::Skip)),
            Some('[') => Ok((State::AfterPhrase(delimiter), Action::Hold)),
            Some(ch) => Ok((state, Action::PushPhrase(ch))),
        },

        State::Escape(delimiter) => match symbol {
            Symbol::Char(ch) if ESCAPABLE.contains(&ch) => {
                Ok((State::Phrase(delimiter), Action::PushPhrase(ch)))
            }
            Symbol::Char(ch) => fail(ErrorKind::DanglingEscape { found: Some(ch) }),
            Symbol::Sentinel | Symbol::End => fail(ErrorKind::DanglingEscape { found: None }),
        },

        State::AfterPhrase(delimiter) => match symbol.as_char() {
            Some(' ') => Ok((state, Action::Skip)),
            Some('[') => Ok((
                State::FieldName {
                    delimiter,
                    empty: true,
                },
                Action::Skip,
            )),
            _ => Ok((State::Init, Action::Emit(delimiter))),
        },

        State::FieldName { delimiter, empty } => match symbol.as_char() {
            None => fail(ErrorKind::UnterminatedFieldTag),
            Some(']') if empty => fail(ErrorKind::EmptyFieldName),
            Some(']') => Ok((State::Init, Action::EmitWithField(delimiter))),
            Some(ch) => Ok((
                State::FieldName {
                    delimiter,
                    empty: false,
                },
                Action::PushField(ch),
            )),
        },
    }
}

/// Non-breaking spaces stay part of a phrase.
const NON_BREAKING: [char; 3] = ['\u{a0}', '\u{2007}', '\u{202f}'];

/// Returns true for whitespace that separates terms.
fn is_breaking_whitespace(ch: char) -> bool {
    ch.is_whitespace() && !NON_BREAKING.contains(&ch)
}

/// Replaces every run of breaking whitespace with a single space.
pub fn normalize_whitespace(input: &str) -> String {
    let mut normalized = String::with_capacity(input.len());
    let mut in_space = false;
    for ch in input.chars() {
        if is_breaking_whitespace(ch) {
            if !in_space {
                normalized.push(' ');
            }
            in_space = true;
        } else {
            normalized.push(ch);
            in_space = false;
        }
    }
    normalized
}

/// Drives [`transition`] over one query.
struct Scanner {
    /// Current machine state.
    state: State,
    /// Key phrase being read.
    phrase: String,
    /// Field name being read.
    field: String,
    /// Position where the pending term started.
    term_start: usize,
    /// Terms emitted so far.
    terms: Vec<QueryTerm>,
}

impl Scanner {
    /// Creates a scanner in the initial state.
    fn new() -> Self {
        Self {
            state: State::Init,
            phrase: String::new(),
            field: String::new(),
            term_start: 0,
            terms: Vec::new(),
        }
    }

    /// Scans a normalized query into terms.
    fn run(mut self, normalized: &str) -> Result<Vec<QueryTerm>, TranslateError> {
        let symbols: Vec<Symbol> = normalized
            .chars()
            .map(Symbol::Char)
            .chain([Symbol::Sentinel, Symbol::End])
            .collect();

        let mut position = 0;
        while let Some(&symbol) = symbols.get(position) {
            let (next, action) = transition(self.state, symbol, position)?;
            trace!(?symbol, position, from = ?self.state, to = ?next, ?action, "scanner transition");

            if self.state == State::Init && next != State::Init {
                self.term_start = position;
            }
            self.state = next;

            match action {
                Action::Skip => position += 1,
                Action::Hold => {}
                Action::PushPhrase(ch) => {
                    self.phrase.push(ch);
                    position += 1;
                }
                Action::PushField(ch) => {
                    self.field.push(ch);
                    position += 1;
                }
                Action::Emit(delimiter) => self.emit(delimiter, None),
                Action::EmitWithField(delimiter) => {
                    let field = FieldRef::parse(&mem::take(&mut self.field));
                    self.emit(delimiter, Some(field));
                    position += 1;
                }
            }
        }

        Ok(self.terms)
    }

    /// Emits the pending term and clears the phrase buffer.
    fn emit(&mut self, delimiter: Delimiter, field: Option<FieldRef>) {
        let mut term = QueryTerm::new(
            mem::take(&mut self.phrase),
            delimiter.is_quoted(),
            self.term_start,
        );
        if let Some(field) = field {
            term = term.with_field(field);
        }
        debug!(phrase = %term.phrase, field = ?term.field, quoted = term.quoted, "scanned term");
        self.terms.push(term);
    }
}

/// Scans a query into terms.
///
/// Errors carry the whitespace-normalized query.
pub fn scan(input: &str) -> Result<Vec<QueryTerm>, TranslateError> {
    let normalized = normalize_whitespace(input);
    Scanner::new()
        .run(&normalized)
        .map_err(|err| err.with_query(normalized))
}
