//! Command implementations and dispatch.

pub mod config;
pub mod entities;
pub mod fields;
pub mod init;
pub mod translate;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Translate(cmd) => translate::run(ctx, &cmd),
        Commands::Entities(cmd) => entities::run(&cmd),
        Commands::Fields => fields::run(),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
    }
}
