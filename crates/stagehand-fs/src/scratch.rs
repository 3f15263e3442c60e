use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::{Result, from_io};

/// A directory that is removed, with its contents, when the guard drops.
pub struct Scratch<'a> {
    root: Cow<'a, Path>,
    armed: bool,
}

impl<'a> Scratch<'a> {
    /// Creates the directory (and missing ancestors) if needed.
    pub fn create(root: impl Into<Cow<'a, Path>>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            std::fs::create_dir_all(root.as_ref()).map_err(|e| from_io(e, root.as_ref()))?;
        }
        Ok(Self { root, armed: true })
    }

    pub fn path(&self) -> &Path { self.root.as_ref() }

    pub fn join(&self, path: impl AsRef<Path>) -> PathBuf { self.root.as_ref().join(path) }

    /// Disarms cleanup and hands back the directory path.
    pub fn keep(mut self) -> PathBuf {
        self.armed = false;
        self.root.to_path_buf()
    }
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match crate::delete_path(self.root.as_ref(), true) {
            Ok(true) => {}
            Ok(false) | Err(_) => {
                tracing::debug!(path = %self.root.display(), "failed to remove scratch directory");
            }
        }
    }
}
