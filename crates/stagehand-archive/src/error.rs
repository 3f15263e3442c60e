use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not create the output directory '{path}': {source}")]
    DestinationUnavailable { path: PathBuf, source: io::Error },

    #[error("archive is corrupted: {0}")]
    Corrupted(#[source] zip::result::ZipError),

    #[error("archive contains no entries")]
    EmptyArchive,

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    ZipSlip { entry: String, resolved: PathBuf },

    #[error("cannot resolve entry '{entry}': {source}")]
    Unresolvable { entry: String, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed {
        path: PathBuf,
        source: stagehand_fs::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self { Self::Corrupted(e) }
}

pub type Result<T> = std::result::Result<T, Error>;
