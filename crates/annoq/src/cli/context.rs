//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use annoq_analyzer::BackendTokenizer;
use annoq_config::Config;
use annoq_query::{Translator, TranslatorConfig};
use tracing::debug;

use crate::cli::args::TranslateCommand;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        debug!(files = ?config.files, "loaded configuration");
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for commands like `init` that should work even when an existing config file is
    /// invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Translator options: configuration values overridden by command-line flags.
    pub fn translator_config(&self, cmd: &TranslateCommand) -> TranslatorConfig {
        let mut config = self.config.translate.translator_config();
        if let Some(operator) = cmd.operator() {
            config.operator = operator;
        }
        if cmd.debug {
            config.debug = true;
        }
        config
    }

    /// Builds the translator for `annoq translate`.
    pub fn translator(
        &self,
        cmd: &TranslateCommand,
    ) -> Result<Translator<BackendTokenizer>, ExitCode> {
        let tokenizer =
            BackendTokenizer::new(self.config.analyzer.max_token_length).map_err(|e| {
                eprintln!("error: failed to build analyzer: {e}");
                ExitCode::FAILURE
            })?;
        Ok(Translator::with_config(self.translator_config(cmd), tokenizer))
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use annoq_query::JoinOperator;

    use super::*;

    /// Context with the given configuration.
    fn ctx(config: Config) -> CommandContext {
        CommandContext {
            cwd: PathBuf::from("/"),
            config,
        }
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.translate.operator = JoinOperator::And;
        let ctx = ctx(config);

        let from_config = ctx.translator_config(&TranslateCommand::default());
        assert_eq!(from_config.operator, JoinOperator::And);
        assert!(!from_config.debug);

        let cmd = TranslateCommand {
            or: true,
            debug: true,
            ..TranslateCommand::default()
        };
        let overridden = ctx.translator_config(&cmd);
        assert_eq!(overridden.operator, JoinOperator::Or);
        assert!(overridden.debug);
    }

    #[test]
    fn debug_from_config_survives_without_flag() {
        let mut config = Config::default();
        config.translate.debug = true;
        assert!(ctx(config).translator_config(&TranslateCommand::default()).debug);
    }
}
