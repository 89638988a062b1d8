//! Implementation of `annoq fields`.

use std::process::ExitCode;

use annoq_query::{
    ANNOTATION_FIELD, CONCEPT_ID_PREFIX, CONCEPT_ID_SUFFIX, CONCEPT_PREFIX, FieldRegistry,
};
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};

/// Prints the legal field names with the backend terms they select.
pub fn run() -> ExitCode {
    let registry = FieldRegistry::default();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Field", "Wildcard (*[Field])", "Concept id tag"]);
    for name in registry.names() {
        let lower = name.to_lowercase();
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{ANNOTATION_FIELD}:{CONCEPT_PREFIX}_{lower}")),
            Cell::new(format!(
                "[{name}{CONCEPT_ID_SUFFIX}] -> {CONCEPT_ID_PREFIX}_<id>"
            )),
        ]);
    }

    println!("{table}");
    ExitCode::SUCCESS
}
