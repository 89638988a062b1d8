//! Implementation of `annoq init`.

use std::{fs, path::Path, process::ExitCode};

use annoq_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};
use tracing::debug;

use crate::cli::{args::InitCommand, context::CommandContext, output::subheader};

/// Writes a commented starter `.annoq.toml`.
///
/// Running in the home directory is the same as `--global`.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let global = global_config_path();
    let in_home = global
        .as_deref()
        .and_then(|p| p.parent())
        .is_some_and(|home| home == ctx.cwd);

    let (path, template) = if cmd.global || in_home {
        let Some(path) = global else {
            eprintln!("error: could not determine home directory");
            return ExitCode::FAILURE;
        };
        (path, global_template())
    } else {
        (ctx.cwd.join(CONFIG_FILENAME), local_template())
    };

    if let Err(message) = write_new(&path, &template, cmd.force) {
        eprintln!("error: {message}");
        return ExitCode::FAILURE;
    }
    debug!(path = %path.display(), "wrote starter config");

    println!("Created {}", path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    for line in template.lines() {
        println!("  {line}");
    }
    ExitCode::SUCCESS
}

/// Writes `contents` to `path`, refusing to replace an existing file unless `force` is set.
fn write_new(path: &Path, contents: &str, force: bool) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "configuration file already exists: {}\nuse --force to overwrite",
            path.display()
        ));
    }
    fs::write(path, contents).map_err(|e| format!("failed to write {}: {e}", path.display()))
}
