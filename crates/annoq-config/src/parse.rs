//! Configuration file parsing.
//!
//! Parses individual `.annoq.toml` files into `RawConfig` structures whose fields are all
//! optional, so partial files can be merged.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Translation settings section.
    pub translate: Option<RawTranslateSettings>,
    /// Analyzer settings section.
    pub analyzer: Option<RawAnalyzerSettings>,
}

/// Raw translation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawTranslateSettings {
    /// Join operator name, `and` or `or`.
    pub operator: Option<String>,
    /// Render debug pairs instead of backend syntax.
    pub debug: Option<bool>,
}

/// Raw analyzer settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawAnalyzerSettings {
    /// Maximum token length in bytes.
    pub max_token_length: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Returns true if the file at `path` sets `root = true`.
///
/// Unreadable or malformed files count as non-root; loading reports their errors later.
pub fn is_root_config(path: &Path) -> bool {
    parse_config_file(path).is_ok_and(|config| config.root == Some(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.translate.is_none());
        assert!(config.analyzer.is_none());
    }

    #[test]
    fn every_setting() {
        let toml = r#"
root = true

[translate]
operator = "and"
debug = true

[analyzer]
max_token_length = 64
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));
        let translate = config.translate.unwrap();
        assert_eq!(translate.operator.as_deref(), Some("and"));
        assert_eq!(translate.debug, Some(true));
        assert_eq!(config.analyzer.unwrap().max_token_length, Some(64));
    }

    #[test]
    fn partial_section() {
        let config = parse_config("[translate]\ndebug = false\n").unwrap();
        let translate = config.translate.unwrap();
        assert!(translate.operator.is_none());
        assert_eq!(translate.debug, Some(false));
    }

    #[test]
    fn unknown_key_names_file() {
        let err = parse_config_str("[translate]\nop = \"and\"\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn wrong_value_type() {
        assert!(parse_config("[analyzer]\nmax_token_length = \"big\"\n").is_err());
    }

    #[test]
    fn root_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".annoq.toml");
        fs::write(&path, "root = true\n").unwrap();
        assert!(is_root_config(&path));
        fs::write(&path, "root = \"yes\"\n").unwrap();
        assert!(!is_root_config(&path));
        assert!(!is_root_config(&dir.path().join("absent.toml")));
    }

    #[test]
    fn missing_file() {
        let err = parse_config_file(Path::new("/nonexistent/.annoq.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
