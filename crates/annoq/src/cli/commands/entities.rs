//! Implementation of `annoq entities`.

use std::{fs, io, process::ExitCode};

use annoq_entity::parse_entity_desc;

use crate::cli::{
    args::EntitiesCommand,
    output::{dim, print_json_pretty},
};

/// Parses an entity description and prints its entries.
pub fn run(cmd: &EntitiesCommand) -> ExitCode {
    let contents = match &cmd.file {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            eprintln!("error: failed to read {}: {e}", path.display());
        }),
        None => io::read_to_string(io::stdin()).map_err(|e| {
            eprintln!("error: failed to read stdin: {e}");
        }),
    };
    let Ok(contents) = contents else {
        return ExitCode::FAILURE;
    };

    let entries = match parse_entity_desc(&contents) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return match print_json_pretty(&entries) {
            Ok(()) => ExitCode::SUCCESS,
            Err(code) => code,
        };
    }

    if entries.is_empty() {
        println!("{}", dim("No entities."));
    }
    for entry in &entries {
        println!("{entry}");
    }
    ExitCode::SUCCESS
}
