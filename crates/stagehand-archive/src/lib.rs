//! Zip extraction with canonical-path containment.
//!
//! # Architecture
//!
//! - `extract.rs` - Extraction loop and boolean entry points
//! - `containment.rs` - Canonical-path containment (zip-slip prevention)
//! - `report.rs` - Per-entry outcomes
//! - `options.rs` - Buffer size and progress hooks

pub use containment::{ContainedPath, canonicalize_lenient, resolve_entry_path};
pub use error::{Error, Result};
pub use extract::{ArchiveExtractor, extract, extract_file};
pub use options::{ExtractOptions, Progress};
pub use report::{EntryKind, EntryOutcome, EntryRecord, ExtractionReport};

mod containment;
mod error;
mod extract;
mod options;
mod report;
