use std::ffi::OsString;
use std::io;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

use crate::error::{Error, Result};

/// An archive entry path that was checked against the extraction root.
#[derive(Clone, Debug)]
pub struct ContainedPath {
    /// Destination joined with the raw entry name.
    pub candidate: PathBuf,
    /// Canonical form of `candidate`, always at or beneath the root.
    pub resolved: PathBuf,
}

/// Joins `entry_name` onto `destination` and checks the result stays inside
/// `root_canonical`.
///
/// The join is a plain string concatenation with the platform separator, so
/// absolute entry names land inside the destination rather than replacing it.
/// Containment is decided on path components: `/dest2` is not inside `/dest`.
pub fn resolve_entry_path(
    destination: &Path,
    root_canonical: &Path,
    entry_name: &str,
) -> Result<ContainedPath> {
    let mut joined = OsString::from(destination.as_os_str());
    joined.push(MAIN_SEPARATOR_STR);
    joined.push(entry_name);
    let candidate = PathBuf::from(joined);

    let resolved = canonicalize_lenient(&candidate).map_err(|e| Error::Unresolvable {
        entry: entry_name.to_owned(),
        source: e,
    })?;

    if !resolved.starts_with(root_canonical) {
        return Err(Error::ZipSlip {
            entry: entry_name.to_owned(),
            resolved,
        });
    }

    Ok(ContainedPath {
        candidate,
        resolved,
    })
}

/// Canonicalizes a path whose tail may not exist yet.
///
/// Components are resolved one at a time against the filesystem. Every
/// existing symlink is followed as soon as it is reached, and `..` pops the
/// already resolved prefix, so a missing component cannot hide a later
/// symlink from the check. A dangling symlink anywhere in the path is an
/// error since its target cannot be checked.
pub fn canonicalize_lenient(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(prefix) => resolved.push(prefix.as_os_str()),
            Component::RootDir => resolved.push(MAIN_SEPARATOR_STR),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => {
                resolved.push(part);
                resolved = follow(resolved)?;
            }
        }
    }

    Ok(resolved)
}

// `path` has a resolved parent; only its last component may be a link.
fn follow(path: PathBuf) -> io::Result<PathBuf> {
    match std::fs::symlink_metadata(&path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            std::fs::canonicalize(&path).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unresolvable symlink at '{}': {e}", path.display()),
                )
            })
        }
        // Missing, or shadowed by a non-directory; the write reports it.
        _ => Ok(path),
    }
}
