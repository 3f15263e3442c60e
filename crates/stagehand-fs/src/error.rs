use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("operation failed")]
    Failed,

    #[error("path not found")]
    NotFound,

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("failed to open '{path}' for writing: {source}")]
    Open { path: PathBuf, source: std::io::Error },

    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("failed to read source stream: {source}")]
    Read { source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Error {
    match err.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound,
        std::io::ErrorKind::PermissionDenied => Error::PermissionDenied { path: path.into() },
        _ => Error::Failed,
    }
}
