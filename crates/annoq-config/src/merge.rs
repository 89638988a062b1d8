//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and validating values.

use std::path::{Path, PathBuf};

use annoq_query::JoinOperator;

use crate::{
    AnalyzerSettings, Config, ConfigError, TranslateSettings,
    parse::{RawAnalyzerSettings, RawConfig, RawTranslateSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For each setting the first defined value wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let mut translate = TranslateSettings::default();
    let mut analyzer = AnalyzerSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.translate {
            apply_raw_translate(&mut translate, raw, &parsed.path)?;
        }
        if let Some(ref raw) = parsed.config.analyzer {
            apply_raw_analyzer(&mut analyzer, raw, &parsed.path)?;
        }
    }

    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Ok(Config {
        translate,
        analyzer,
        config_root,
        files: configs.iter().map(|c| c.path.clone()).collect(),
    })
}

/// Applies raw translation settings, overwriting any present values.
fn apply_raw_translate(
    result: &mut TranslateSettings,
    raw: &RawTranslateSettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.operator {
        result.operator = v
            .parse::<JoinOperator>()
            .map_err(|message| ConfigError::InvalidValue {
                path: path.to_path_buf(),
                key: "translate.operator",
                message,
            })?;
    }
    if let Some(v) = raw.debug {
        result.debug = v;
    }
    Ok(())
}

/// Applies raw analyzer settings, overwriting any present values.
fn apply_raw_analyzer(
    result: &mut AnalyzerSettings,
    raw: &RawAnalyzerSettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(v) = raw.max_token_length {
        if v == 0 {
            return Err(ConfigError::InvalidValue {
                path: path.to_path_buf(),
                key: "analyzer.max_token_length",
                message: "must be at least 1".to_string(),
            });
        }
        result.max_token_length = v;
    }
    Ok(())
}
