use std::path::{Path, PathBuf};

/// Supplies the application cache directory staged assets live under.
pub trait CacheDirectory {
    /// `None` when the platform cannot provide a cache directory.
    fn application_cache_dir(&self) -> Option<PathBuf>;
}

/// A cache directory fixed at construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedCacheDirectory(PathBuf);

impl FixedCacheDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self(path.into()) }

    pub fn path(&self) -> &Path { &self.0 }
}

impl CacheDirectory for FixedCacheDirectory {
    fn application_cache_dir(&self) -> Option<PathBuf> { Some(self.0.clone()) }
}

impl<T: CacheDirectory + ?Sized> CacheDirectory for &T {
    fn application_cache_dir(&self) -> Option<PathBuf> { (**self).application_cache_dir() }
}
