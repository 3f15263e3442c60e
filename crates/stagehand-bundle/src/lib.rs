//! Rules bundle staging on top of the archive extractor.
//!
//! A bundle arrives as a byte stream (usually an HTTP body). It is written to
//! a scratch directory, extracted, copied into the rules cache and the rules
//! JSON handed back. Message assets cached alongside are pruned by hash.

pub use assets::{clean_directory, clear_cached_assets_not_in_list, sha256_hex};
pub use config::StagingConfig;
pub use error::{Error, Result};
pub use stage::{Reason, RulesLoadResult, RulesStager};

mod assets;
mod config;
mod error;
mod stage;
