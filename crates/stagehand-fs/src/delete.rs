use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;

use crate::cache::CacheDirectory;
use crate::{Error, Result};

const DATABASE_COMPANION_SUFFIXES: [&str; 3] = ["-journal", "-shm", "-wal"];
const MASTER_JOURNAL_MARKER: &str = "-mj";

/// Deletes a file, an empty directory or, with `recursive`, a whole tree.
///
/// An empty path yields `Ok(false)`. A missing target counts as deleted only
/// for recursive deletion. Permission failures are the one error surfaced to
/// the caller; anything else collapses to `Ok(false)`.
pub fn delete_path(path: impl AsRef<Path>, recursive: bool) -> Result<bool> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Ok(false);
    }

    let metadata = match std::fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(recursive),
        Err(e) => return settle(e, path),
    };

    let removed = if metadata.is_dir() {
        if recursive {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_dir(path)
        }
    } else {
        std::fs::remove_file(path)
    };

    match removed {
        Ok(()) => Ok(true),
        Err(e) => settle(e, path),
    }
}

fn settle(err: std::io::Error, path: &Path) -> Result<bool> {
    match err.kind() {
        ErrorKind::PermissionDenied => Err(Error::PermissionDenied {
            path: path.to_path_buf(),
        }),
        _ => {
            tracing::debug!(path = %path.display(), error = %err, "failed to delete path");
            Ok(false)
        }
    }
}

/// Deletes a database file and its journal companions from the cache directory.
///
/// Returns `true` when the database or any of its `-journal`, `-shm` or `-wal`
/// companions was removed. Master journal files (`<name>-mj*`) are removed on
/// a best-effort basis.
pub fn delete_database_file<C: CacheDirectory + ?Sized>(cache: &C, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let Some(cache_dir) = cache.application_cache_dir() else {
        tracing::debug!(name, "cannot delete database, cache directory is unavailable");
        return false;
    };

    match try_delete_database(&cache_dir, name) {
        Ok(deleted) => deleted,
        Err(e) => {
            tracing::debug!(name, error = %e, "failed to delete database in cache directory");
            false
        }
    }
}

fn try_delete_database(cache_dir: &Path, name: &str) -> Result<bool> {
    let database = cache_dir.join(name);
    let mut deleted = delete_path(&database, false)?;

    for suffix in DATABASE_COMPANION_SUFFIXES {
        let mut companion = OsString::from(database.as_os_str());
        companion.push(suffix);
        deleted |= delete_path(Path::new(&companion), false)?;
    }

    let marker = format!("{name}{MASTER_JOURNAL_MARKER}");
    if let Ok(listing) = std::fs::read_dir(cache_dir) {
        for entry in listing.flatten() {
            if !entry.file_name().to_string_lossy().starts_with(&marker) {
                continue;
            }
            let path = entry.path();
            match delete_path(&path, false) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(path = %path.display(), "master journal was not deleted")
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "failed to delete master journal")
                }
            }
        }
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::cache::FixedCacheDirectory;
    use tempfile::tempdir;

    struct NoCache;

    impl CacheDirectory for NoCache {
        fn application_cache_dir(&self) -> Option<PathBuf> { None }
    }

    #[test]
    fn empty_path_is_not_deleted() {
        assert!(!delete_path("", false).unwrap());
        assert!(!delete_path("", true).unwrap());
    }

    #[test]
    fn deletes_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        assert!(delete_path(&file, false).unwrap());
        assert!(!file.exists());
    }

    #[test]
    fn missing_target() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(!delete_path(&missing, false).unwrap());
        assert!(delete_path(&missing, true).unwrap());
    }

    #[test]
    fn non_recursive_refuses_populated_directory() {
        let dir = tempdir().unwrap();
        let tree = dir.path().join("tree");
        fs::create_dir_all(tree.join("nested")).unwrap();
        fs::write(tree.join("nested/file"), "x").unwrap();

        assert!(!delete_path(&tree, false).unwrap());
        assert!(tree.exists());

        assert!(delete_path(&tree, true).unwrap());
        assert!(!tree.exists());
    }

    #[test]
    fn non_recursive_removes_empty_directory() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty");
        fs::create_dir(&empty).unwrap();
        assert!(delete_path(&empty, false).unwrap());
        assert!(!empty.exists());
    }

    #[test]
    fn database_and_companions_removed() {
        let dir = tempdir().unwrap();
        let cache = FixedCacheDirectory::new(dir.path());
        for name in ["hits.sqlite", "hits.sqlite-journal", "hits.sqlite-wal", "hits.sqlite-mj01"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::write(dir.path().join("other.sqlite"), "keep").unwrap();

        assert!(delete_database_file(&cache, "hits.sqlite"));
        assert!(!dir.path().join("hits.sqlite").exists());
        assert!(!dir.path().join("hits.sqlite-journal").exists());
        assert!(!dir.path().join("hits.sqlite-wal").exists());
        assert!(!dir.path().join("hits.sqlite-mj01").exists());
        assert!(dir.path().join("other.sqlite").exists());
    }

    #[test]
    fn stuck_master_journal_does_not_mask_deletion() {
        let dir = tempdir().unwrap();
        let cache = FixedCacheDirectory::new(dir.path());
        fs::write(dir.path().join("hits.sqlite"), "x").unwrap();
        fs::write(dir.path().join("hits.sqlite-mj01"), "x").unwrap();
        fs::create_dir(dir.path().join("hits.sqlite-mj02")).unwrap();
        fs::write(dir.path().join("hits.sqlite-mj02/held"), "x").unwrap();

        assert!(delete_database_file(&cache, "hits.sqlite"));
        assert!(!dir.path().join("hits.sqlite").exists());
        assert!(!dir.path().join("hits.sqlite-mj01").exists());
        assert!(dir.path().join("hits.sqlite-mj02").is_dir());
    }

    #[test]
    fn master_journal_alone_is_not_a_deletion() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hits.sqlite-mj01"), "x").unwrap();

        assert!(!delete_database_file(&FixedCacheDirectory::new(dir.path()), "hits.sqlite"));
        assert!(!dir.path().join("hits.sqlite-mj01").exists());
    }

    #[test]
    fn database_rejects_empty_name_and_missing_cache() {
        let dir = tempdir().unwrap();
        assert!(!delete_database_file(&FixedCacheDirectory::new(dir.path()), ""));
        assert!(!delete_database_file(&NoCache, "hits.sqlite"));
    }

    #[test]
    fn missing_database_reports_false() {
        let dir = tempdir().unwrap();
        assert!(!delete_database_file(&FixedCacheDirectory::new(dir.path()), "absent.sqlite"));
    }
}
