//! Configuration file discovery.
//!
//! `.annoq.toml` files are collected from the working directory and each of its ancestors.
//! A file with `root = true` ends the walk; otherwise the global `~/.annoq.toml` is appended
//! with the lowest precedence.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::trace;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".annoq.toml";

/// Discovers all configuration files relevant to `cwd`, highest precedence first.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for candidate in cwd.ancestors().map(|dir| dir.join(CONFIG_FILENAME)) {
        if !candidate.is_file() {
            continue;
        }
        let stop = is_root_config(&candidate);
        trace!(path = %candidate.display(), root = stop, "found config file");
        configs.push(candidate);
        if stop {
            return configs;
        }
    }

    if let Some(global) = global_config_path().filter(|p| p.is_file() && !configs.contains(p)) {
        configs.push(global);
    }
    configs
}

/// Path of the global configuration file, `None` without a home directory.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Returns true if `path` is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
