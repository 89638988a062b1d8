//! Scratch directory trees for unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory tree, removed on drop.
pub struct Tree(TempDir);

impl Tree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// The tree's root directory.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates `rel` and its parents under the root.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let dir = self.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes `.annoq.toml` with `contents` into `rel`.
    pub fn config(&self, rel: &str, contents: &str) -> PathBuf {
        let file = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&file, contents).unwrap();
        file
    }
}
