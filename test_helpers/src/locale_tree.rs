//! Temporary directories populated with bundle resources.
//!
//! # Examples
//!
//! ```
//! use locale_bundle_test_helpers::locale_tree::LocaleTree;
//!
//! let tree = LocaleTree::new()?
//!     .with_file("app.json", r#"{"title":"Shop"}"#)?
//!     .with_file("errors/app_en.properties", "title=Store\n")?;
//! assert!(tree.root().join("errors").is_dir());
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

/// A temporary directory of resource files, removed on drop.
#[derive(Debug)]
pub struct LocaleTree {
    root: Utf8PathBuf,
    dir: Dir,
    _temp: TempDir,
}

impl LocaleTree {
    /// Creates an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is not
    /// valid UTF-8.
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create locale tree")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path {} is not UTF-8", path.display()))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open locale tree {root}"))?;
        Ok(Self {
            root,
            dir,
            _temp: temp,
        })
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, relative: impl AsRef<Utf8Path>, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = relative.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
            self.dir
                .create_dir_all(parent)
                .with_context(|| format!("create {parent}"))?;
        }
        self.dir
            .write(path, contents)
            .with_context(|| format!("write {path}"))
    }

    /// Writes a file and returns the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn with_file(self, relative: impl AsRef<Utf8Path>, contents: impl AsRef<[u8]>) -> Result<Self> {
        self.write(relative, contents)?;
        Ok(self)
    }

    /// Removes `relative` from the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    pub fn remove(&self, relative: impl AsRef<Utf8Path>) -> Result<()> {
        let path = relative.as_ref();
        self.dir
            .remove_file(path)
            .with_context(|| format!("remove {path}"))
    }

    /// Absolute path of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Utf8Path>) -> Utf8PathBuf {
        self.root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_files() -> Result<()> {
        let tree = LocaleTree::new()?.with_file("a/b/c.json", "{}")?;
        assert_eq!(std::fs::read_to_string(tree.path("a/b/c.json"))?, "{}");
        tree.remove("a/b/c.json")?;
        assert!(!tree.path("a/b/c.json").exists());
        Ok(())
    }
}
