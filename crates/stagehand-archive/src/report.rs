use std::path::PathBuf;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// What happened to a single entry.
#[derive(Debug)]
pub enum EntryOutcome {
    Extracted { bytes: u64 },
    Failed(Error),
}

#[derive(Debug)]
pub struct EntryRecord {
    pub name: String,
    pub target: PathBuf,
    pub kind: EntryKind,
    pub outcome: EntryOutcome,
}

impl EntryRecord {
    pub fn succeeded(&self) -> bool { matches!(self.outcome, EntryOutcome::Extracted { .. }) }
}

/// Per-entry account of an extraction that ran to the end of the archive.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub entries: Vec<EntryRecord>,
    pub bytes_written: u64,
}

impl ExtractionReport {
    pub(crate) fn push(&mut self, record: EntryRecord) {
        if let EntryOutcome::Extracted { bytes } = record.outcome {
            self.bytes_written += bytes;
        }
        self.entries.push(record);
    }

    /// True iff there was at least one entry and every entry was materialized.
    pub fn is_success(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(EntryRecord::succeeded)
    }

    pub fn extracted_count(&self) -> usize { self.entries.iter().filter(|e| e.succeeded()).count() }

    pub fn failed(&self) -> impl Iterator<Item = &EntryRecord> { self.entries.iter().filter(|e| !e.succeeded()) }
}
