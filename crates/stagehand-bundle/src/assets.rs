use std::collections::HashSet;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::Result;

/// Lowercase hex SHA-256 of `text`; cached assets and scratch directories are
/// named this way.
pub fn sha256_hex(text: &str) -> String { hex::encode(Sha256::digest(text.as_bytes())) }

/// Deletes every file under `root` whose name is not the hash of a retained key.
///
/// Directories are walked but kept. Returns how many files were removed.
pub fn clear_cached_assets_not_in_list<S: AsRef<str>>(root: &Path, retain: &[S]) -> Result<usize> {
    let keep: HashSet<String> = retain.iter().map(|k| sha256_hex(k.as_ref())).collect();
    prune(root, &keep)
}

fn prune(path: &Path, keep: &HashSet<String>) -> Result<usize> {
    let Ok(metadata) = std::fs::symlink_metadata(path) else {
        return Ok(0);
    };

    if metadata.is_dir() {
        let listing = match std::fs::read_dir(path) {
            Ok(listing) => listing,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot list cached assets");
                return Ok(0);
            }
        };
        let mut removed = 0;
        for entry in listing.flatten() {
            removed += prune(&entry.path(), keep)?;
        }
        return Ok(removed);
    }

    let retained = path
        .file_name()
        .is_some_and(|name| keep.contains(name.to_string_lossy().as_ref()));
    if retained {
        return Ok(0);
    }

    tracing::trace!(path = %path.display(), "removing stale cached asset");
    Ok(usize::from(stagehand_fs::delete_path(path, false)?))
}

/// Removes `root` and everything beneath it.
pub fn clean_directory(root: &Path) -> Result<bool> { Ok(stagehand_fs::delete_path(root, true)?) }

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::tempdir;

    #[test]
    fn known_digest() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn keeps_only_hashed_names() {
        let dir = tempdir().unwrap();
        let keep_a = sha256_hex("https://cdn.example.com/a.png");
        let keep_b = sha256_hex("https://cdn.example.com/b.png");
        fs::create_dir_all(dir.path().join("msg1")).unwrap();
        fs::create_dir_all(dir.path().join("msg2")).unwrap();
        fs::write(dir.path().join("msg1").join(&keep_a), "a").unwrap();
        fs::write(dir.path().join("msg2").join(&keep_b), "b").unwrap();
        fs::write(dir.path().join("msg2/stale"), "old").unwrap();

        let removed = clear_cached_assets_not_in_list(
            dir.path(),
            &["https://cdn.example.com/a.png", "https://cdn.example.com/b.png"],
        )
        .unwrap();

        assert_eq!(removed, 1);
        assert!(dir.path().join("msg1").join(&keep_a).exists());
        assert!(dir.path().join("msg2").join(&keep_b).exists());
        assert!(!dir.path().join("msg2/stale").exists());
        assert!(dir.path().join("msg2").is_dir());
    }

    #[test]
    fn empty_retain_list_clears_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one"), "1").unwrap();
        fs::write(dir.path().join("two"), "2").unwrap();
        let none: [&str; 0] = [];
        assert_eq!(clear_cached_assets_not_in_list(dir.path(), &none).unwrap(), 2);
    }

    #[test]
    fn missing_root_is_noop() {
        let dir = tempdir().unwrap();
        let none: [&str; 0] = [];
        assert_eq!(clear_cached_assets_not_in_list(&dir.path().join("absent"), &none).unwrap(), 0);
    }

    #[test]
    fn clean_directory_removes_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("campaign");
        fs::create_dir_all(root.join("campaignRules")).unwrap();
        fs::write(root.join("campaignRules/rules.json"), "{}").unwrap();
        assert!(clean_directory(&root).unwrap());
        assert!(!root.exists());
    }
}
