//! Implementation of `annoq translate`.

use std::{
    io::{self, BufRead},
    process::ExitCode,
};

use annoq_query::{QueryTerm, Translation};
use serde::Serialize;
use tracing::debug;

use crate::cli::{
    args::TranslateCommand,
    context::CommandContext,
    output::{dim, print_json, subheader},
};

/// JSON record for a query that failed to translate.
#[derive(Serialize)]
struct JsonFailure<'a> {
    /// The query as given.
    input: &'a str,
    /// Rendered error message.
    error: String,
}

/// Translates each query argument, or each stdin line when none are given.
///
/// Without `--keep-going` the first failing query stops the run with exit status 1. With it,
/// failures are reported and replaced by an empty output line, so output lines stay aligned
/// with input lines.
pub fn run(ctx: &CommandContext, cmd: &TranslateCommand) -> ExitCode {
    let translator = match ctx.translator(cmd) {
        Ok(t) => t,
        Err(code) => return code,
    };

    let queries: Box<dyn Iterator<Item = io::Result<String>>> = if cmd.queries.is_empty() {
        Box::new(io::stdin().lock().lines())
    } else {
        Box::new(cmd.queries.iter().cloned().map(Ok))
    };

    let mut failures = 0usize;
    for (idx, query) in queries.enumerate() {
        let query = match query {
            Ok(q) => q,
            Err(e) => {
                eprintln!("error: failed to read query: {e}");
                return ExitCode::FAILURE;
            }
        };

        let outcome = match translator.run(&query) {
            Ok(translation) => emit(&translation, cmd, idx),
            Err(e) => {
                let message = e.to_string();
                eprintln!("error: {}", message.trim_end());
                if !cmd.keep_going {
                    return ExitCode::FAILURE;
                }
                failures += 1;
                emit_failure(&query, message.trim_end(), cmd)
            }
        };
        if let Err(code) = outcome {
            return code;
        }
    }

    debug!(failures, "translate finished");
    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Prints one successful translation in the selected format.
fn emit(translation: &Translation, cmd: &TranslateCommand, idx: usize) -> Result<(), ExitCode> {
    if cmd.json {
        return print_json(translation);
    }
    if cmd.explain {
        if idx > 0 {
            println!();
        }
        print_explanation(translation);
        return Ok(());
    }
    println!("{}", translation.query);
    Ok(())
}

/// Prints the placeholder for a failed query under `--keep-going`.
fn emit_failure(input: &str, error: &str, cmd: &TranslateCommand) -> Result<(), ExitCode> {
    if cmd.json {
        return print_json(&JsonFailure {
            input,
            error: error.to_string(),
        });
    }
    if !cmd.explain {
        println!();
    }
    Ok(())
}

/// Prints the stages of one translation.
fn print_explanation(translation: &Translation) {
    println!("{}", subheader("Query:"));
    println!("   {}", translation.input);
    println!();

    println!("{}", subheader("Terms:"));
    if translation.terms.is_empty() {
        println!("   {}", dim("(empty query)"));
    }
    for (i, term) in translation.terms.iter().enumerate() {
        println!("   {}. {}", i + 1, describe_term(term));
    }
    println!();

    println!("{}", subheader("Fragments:"));
    for (i, fragment) in translation.fragments.iter().enumerate() {
        println!("   {}. {:<10} {}", i + 1, fragment.kind(), fragment);
    }
    println!();

    println!("{}", subheader("Translation:"));
    println!("   {}", translation.query);
}

/// One-line description of a scanned term.
fn describe_term(term: &QueryTerm) -> String {
    let field = term
        .field
        .as_ref()
        .map_or_else(|| "(no field)".to_string(), |f| format!("[{}]", f.label()));
    let quoted = if term.quoted { " quoted" } else { "" };
    format!("{:?} {} at {}{}", term.phrase, field, term.position, quoted)
}

#[cfg(test)]
mod tests {
    use annoq_query::FieldRef;

    use super::*;

    #[test]
    fn describe_plain_term() {
        let term = QueryTerm::new("brca1", false, 0);
        assert_eq!(describe_term(&term), "\"brca1\" (no field) at 0");
    }

    #[test]
    fn describe_tagged_term() {
        let term = QueryTerm::new("rs1", true, 4).with_field(FieldRef::parse("SNP_id"));
        assert_eq!(describe_term(&term), "\"rs1\" [snp_id] at 4 quoted");
    }
}
