use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use stagehand_archive::ArchiveExtractor;
use stagehand_fs::{CacheDirectory, Scratch, copy_stream_to_file};

use crate::assets::{clear_cached_assets_not_in_list, sha256_hex};
use crate::config::StagingConfig;
use crate::error::Result;

/// Why a staging attempt ended the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    Success,
    NoData,
    CannotCreateTempDir,
    CannotStoreInTempDir,
    ZipExtractionFailed,
    RulesFileMissing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulesLoadResult {
    pub data: Option<String>,
    pub reason: Reason,
}

impl RulesLoadResult {
    fn failed(reason: Reason) -> Self { Self { data: None, reason } }
}

/// Turns a downloaded rules bundle into cached files plus the rules JSON.
pub struct RulesStager<C> {
    cache: C,
    config: StagingConfig,
    extractor: ArchiveExtractor,
}

impl<C: CacheDirectory> RulesStager<C> {
    pub fn new(cache: C, config: StagingConfig) -> Self {
        let extractor = config.extractor();
        Self {
            cache,
            config,
            extractor,
        }
    }

    pub fn config(&self) -> &StagingConfig { &self.config }

    /// Stages the bundle read from `stream`, downloaded for `key`.
    ///
    /// The stream is written to a scratch directory named after the key's
    /// hash, extracted there, and every resulting file is copied flat into the
    /// rules cache. The scratch directory is gone when this returns.
    pub fn stage<R: Read>(&self, key: &str, stream: Option<R>) -> RulesLoadResult {
        let Some(mut stream) = stream else {
            tracing::debug!(key, "bundle stream is missing");
            return RulesLoadResult::failed(Reason::NoData);
        };

        let Some(scratch_root) = self.scratch_dir(key) else {
            tracing::debug!(key, "cannot access application cache directory to create temp dir");
            return RulesLoadResult::failed(Reason::CannotCreateTempDir);
        };
        let scratch = match Scratch::create(scratch_root) {
            Ok(scratch) => scratch,
            Err(e) => {
                tracing::debug!(key, error = %e, "cannot create temp dir");
                return RulesLoadResult::failed(Reason::CannotCreateTempDir);
            }
        };

        let archive = scratch.join(&self.config.archive_file_name);
        if !copy_stream_to_file(&mut stream, &archive, false) {
            tracing::debug!(key, "couldn't store bundle in temp dir");
            return RulesLoadResult::failed(Reason::CannotStoreInTempDir);
        }

        if !self.extractor.extract_file(&archive, scratch.path()) {
            tracing::debug!(key, "failed to extract bundle into temp dir");
            return RulesLoadResult::failed(Reason::ZipExtractionFailed);
        }

        if !self.cache_extracted_files(scratch.path()) {
            tracing::debug!(key, "could not cache every extracted file");
        }
        drop(scratch);

        match self.cached_rules() {
            Some(data) => RulesLoadResult {
                data: Some(data),
                reason: Reason::Success,
            },
            None => RulesLoadResult::failed(Reason::RulesFileMissing),
        }
    }

    /// Rules JSON from the last successful staging, if any.
    pub fn cached_rules(&self) -> Option<String> {
        let path = self.rules_cache_dir()?.join(&self.config.rules_file_name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no cached rules");
                None
            }
        }
    }

    /// Removes cached message assets that belong to none of `retain`.
    pub fn prune_message_assets<S: AsRef<str>>(&self, retain: &[S]) -> Result<usize> {
        match self.cache.application_cache_dir() {
            Some(cache) => {
                clear_cached_assets_not_in_list(&cache.join(&self.config.message_cache_dir), retain)
            }
            None => Ok(0),
        }
    }

    /// Deletes the hit database left over from the previous storage layout.
    pub fn delete_legacy_database(&self) -> bool {
        stagehand_fs::delete_database_file(&self.cache, &self.config.legacy_database)
    }

    pub fn rules_cache_dir(&self) -> Option<PathBuf> {
        self.cache
            .application_cache_dir()
            .map(|cache| cache.join(&self.config.rules_cache_dir))
    }

    fn scratch_dir(&self, key: &str) -> Option<PathBuf> {
        self.cache
            .application_cache_dir()
            .map(|cache| cache.join(&self.config.temp_dir).join(sha256_hex(key)))
    }

    fn cache_extracted_files(&self, scratch: &Path) -> bool {
        let Some(target) = self.rules_cache_dir() else {
            return false;
        };
        if let Err(e) = std::fs::create_dir_all(&target) {
            tracing::debug!(path = %target.display(), error = %e, "cannot create rules cache");
            return false;
        }
        cache_tree(scratch, &target)
    }
}

fn cache_tree(dir: &Path, target: &Path) -> bool {
    let Ok(listing) = std::fs::read_dir(dir) else {
        return false;
    };

    let mut cached = true;
    for entry in listing.flatten() {
        let path = entry.path();
        if path.is_dir() {
            cached &= cache_tree(&path, target);
            continue;
        }
        let Some(name) = path.file_name() else {
            continue;
        };
        tracing::trace!(file = %name.to_string_lossy(), "caching file");
        cached &= match File::open(&path) {
            Ok(mut source) => copy_stream_to_file(&mut source, target.join(name), false),
            Err(_) => false,
        };
    }
    cached
}
