//! Directory-backed resource store.

use std::fmt;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use super::{ResourceReader, Source, SourceId};

/// Resources read from files inside one directory.
///
/// The directory is opened once through `cap-std`, so resource paths cannot
/// escape it (`..` and absolute paths are rejected by the capability).
pub struct DirSource {
    root: Utf8PathBuf,
    dir: Dir,
}

impl DirSource {
    /// Opens `root` as a resource store.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> io::Result<Self> {
        let path = root.as_ref();
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self {
            root: path.to_path_buf(),
            dir,
        })
    }

    /// Directory the store reads from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl fmt::Debug for DirSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirSource").field("root", &self.root).finish()
    }
}

impl Source for DirSource {
    fn id(&self) -> SourceId {
        SourceId::new("dir", self.root.as_str(), "filesystem")
    }

    fn open(&self, resource: &str) -> io::Result<Option<ResourceReader>> {
        match self.dir.open(resource) {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}
