//! CLI support for the `annoq` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;

use std::io;

pub use context::CommandContext;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects the level for annoq's own crates.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!(
            "warn,annoq={level},annoq_query={level},annoq_analyzer={level},annoq_entity={level},annoq_config={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
