//! Zip extraction into a destination directory.
//!
//! Security and I/O failures are treated differently. An entry that resolves
//! outside the destination aborts the whole extraction; an entry that cannot
//! be written is recorded as failed and the remaining entries are still
//! attempted. Either way the overall outcome is a failure.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use crate::containment::resolve_entry_path;
use crate::error::{Error, Result};
use crate::options::{ExtractOptions, Progress};
use crate::report::{EntryKind, EntryOutcome, EntryRecord, ExtractionReport};

#[derive(Clone, Debug, Default)]
pub struct ArchiveExtractor {
    options: ExtractOptions,
}

impl ArchiveExtractor {
    pub fn new(options: ExtractOptions) -> Self { Self { options } }

    pub fn options(&self) -> &ExtractOptions { &self.options }

    /// Extracts `archive` into `destination`, returning whether every entry
    /// was materialized.
    ///
    /// Never fails outward; the reason for a `false` is logged.
    pub fn extract<R: Read + Seek>(&self, archive: R, destination: impl AsRef<Path>) -> bool {
        let destination = destination.as_ref();
        match self.extract_with_report(archive, destination) {
            Ok(report) => {
                for record in report.failed() {
                    if let EntryOutcome::Failed(ref e) = record.outcome {
                        tracing::debug!(entry = %record.name, error = %e, "entry was not extracted");
                    }
                }
                report.is_success()
            }
            Err(e) => {
                tracing::debug!(destination = %destination.display(), error = %e, "extraction failed");
                false
            }
        }
    }

    /// Opens the archive at `zip_path` and extracts it into `destination`.
    pub fn extract_file(&self, zip_path: impl AsRef<Path>, destination: impl AsRef<Path>) -> bool {
        let zip_path = zip_path.as_ref();
        match File::open(zip_path) {
            Ok(file) => self.extract(file, destination),
            Err(e) => {
                tracing::debug!(archive = %zip_path.display(), error = %e, "cannot open archive");
                false
            }
        }
    }

    /// Extracts `archive` and returns the per-entry account.
    ///
    /// `Err` means the extraction was abandoned: the destination could not be
    /// created, the archive was unreadable or empty, or an entry tried to
    /// escape the destination. Entries that merely failed to write are
    /// reported inside `Ok`.
    pub fn extract_with_report<R: Read + Seek>(
        &self,
        archive: R,
        destination: impl AsRef<Path>,
    ) -> Result<ExtractionReport> {
        let destination = destination.as_ref();
        prepare_destination(destination)?;

        let mut archive = zip::ZipArchive::new(archive)?;
        let root_canonical =
            std::fs::canonicalize(destination).map_err(|e| Error::DestinationUnavailable {
                path: destination.to_path_buf(),
                source: e,
            })?;

        if archive.is_empty() {
            return Err(Error::EmptyArchive);
        }

        let mut report = ExtractionReport::default();
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_owned();
            let contained = resolve_entry_path(destination, &root_canonical, &name)?;

            let kind = if entry.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            let outcome = match kind {
                EntryKind::Directory => ensure_directory(&contained.resolved).map(|()| 0),
                EntryKind::File => {
                    write_file(&mut entry, &contained.resolved, self.options.buffer_size)
                }
            };
            let outcome = match outcome {
                Ok(bytes) => EntryOutcome::Extracted { bytes },
                Err(e) => EntryOutcome::Failed(e),
            };
            tracing::trace!(
                entry = %name,
                ?kind,
                ok = matches!(outcome, EntryOutcome::Extracted { .. }),
                "processed entry"
            );

            report.push(EntryRecord {
                name,
                target: contained.resolved,
                kind,
                outcome,
            });

            if let Some(ref callback) = self.options.on_progress {
                callback(Progress {
                    entries_processed: report.entries.len(),
                    bytes_written: report.bytes_written,
                    current_entry: report
                        .entries
                        .last()
                        .map(|e| e.name.clone())
                        .unwrap_or_default(),
                });
            }
        }

        Ok(report)
    }
}

/// Extracts with default options. See [`ArchiveExtractor::extract`].
pub fn extract<R: Read + Seek>(archive: R, destination: impl AsRef<Path>) -> bool {
    ArchiveExtractor::default().extract(archive, destination)
}

/// Extracts a zip file with default options. See [`ArchiveExtractor::extract_file`].
pub fn extract_file(zip_path: impl AsRef<Path>, destination: impl AsRef<Path>) -> bool {
    ArchiveExtractor::default().extract_file(zip_path, destination)
}

// Single level only; a missing parent of the destination is the caller's problem.
fn prepare_destination(destination: &Path) -> Result<()> {
    if destination.exists() {
        return Ok(());
    }
    std::fs::create_dir(destination).map_err(|e| Error::DestinationUnavailable {
        path: destination.to_path_buf(),
        source: e,
    })
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

fn write_file<R: Read>(entry: &mut R, target: &Path, buffer_size: usize) -> Result<u64> {
    if let Some(parent) = target.parent() {
        ensure_directory(parent)?;
    }

    stagehand_fs::write_stream_to_file(entry, target, false, buffer_size).map_err(|e| {
        Error::ExtractionFailed {
            path: target.to_path_buf(),
            source: e,
        }
    })
}
