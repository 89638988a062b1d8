//! Implementation of `annoq config`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings as TOML.
///
/// The merged files are listed as leading comments, so the output stays a valid config file.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    let rendered = match config.settings_to_toml() {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config.files.is_empty() {
        println!("# no configuration files found; showing defaults");
    } else {
        println!("# merged from (highest precedence first):");
        for path in &config.files {
            println!("#   {}", path.display());
        }
    }
    print!("{rendered}");
    ExitCode::SUCCESS
}
