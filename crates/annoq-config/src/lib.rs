//! Configuration system for annoq.
//!
//! annoq uses TOML configuration files named `.annoq.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.annoq.toml` files
//! found, then loading `~/.annoq.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

use annoq_analyzer::DEFAULT_MAX_TOKEN_LENGTH;
use annoq_query::{JoinOperator, TranslatorConfig};
pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawAnalyzerSettings, RawConfig, RawTranslateSettings, parse_config_file, parse_config_str,
};
use serde::Serialize;
pub use templates::{global_template, local_template};

/// Top-level merged configuration for annoq.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Translation settings.
    pub translate: TranslateSettings,
    /// Analyzer settings.
    pub analyzer: AnalyzerSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Config files that were merged, highest precedence first.
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.annoq.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Serializes the effective settings in `.annoq.toml` format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            translate: &self.translate,
            analyzer: &self.analyzer,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Translation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslateSettings {
    /// Operator joining term fragments.
    pub operator: JoinOperator,
    /// Render `phrase:field` pairs instead of backend syntax.
    pub debug: bool,
}

impl TranslateSettings {
    /// Builds the translator options for these settings.
    pub fn translator_config(&self) -> TranslatorConfig {
        TranslatorConfig::default()
            .with_operator(self.operator)
            .with_debug(self.debug)
    }
}

/// Analyzer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzerSettings {
    /// Tokens longer than this many bytes are dropped.
    pub max_token_length: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
        }
    }
}

/// Settings view rendered by [`Config::settings_to_toml`].
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// `[translate]` section.
    translate: &'a TranslateSettings,
    /// `[analyzer]` section.
    analyzer: &'a AnalyzerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_round_trip_through_toml() {
        let rendered = Config::default().settings_to_toml().unwrap();
        assert!(rendered.contains("[translate]"));
        assert!(rendered.contains("operator = \"or\""));
        assert!(rendered.contains("max_token_length = 128"));

        let raw = parse::parse_config(&rendered).unwrap();
        assert_eq!(raw.translate.unwrap().operator.as_deref(), Some("or"));
    }

    #[test]
    fn translator_config_carries_settings() {
        let settings = TranslateSettings {
            operator: JoinOperator::And,
            debug: true,
        };
        let config = settings.translator_config();
        assert_eq!(config.operator, JoinOperator::And);
        assert!(config.debug);
    }
}
