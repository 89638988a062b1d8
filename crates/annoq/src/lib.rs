//! annoq: keyword queries for annotated biomedical text.
//!
//! Users write Pubmed-style queries such as `"breast cancer"[Disease] brca1[Gene]`; annoq
//! translates them into the span queries understood by an annotation-aware search backend,
//! one query per line, so the output can be piped straight into a search client.

#![warn(missing_docs)]

pub mod cli;
