use std::path::Path;

use serde::Deserialize;
use stagehand_archive::{ArchiveExtractor, ExtractOptions};

use crate::error::{Error, Result};

/// Directory and file names used when staging bundles under a cache directory.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StagingConfig {
    /// Parent of the per-bundle scratch directories.
    pub temp_dir: String,
    /// Name the downloaded archive is stored under inside the scratch directory.
    pub archive_file_name: String,
    /// Where extracted bundle files are cached, relative to the cache directory.
    pub rules_cache_dir: String,
    pub rules_file_name: String,
    /// Downloaded message assets, relative to the cache directory.
    pub message_cache_dir: String,
    /// Hit database left behind by the previous storage layout.
    pub legacy_database: String,
    pub buffer_size: usize,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            temp_dir: "campaign_temp".into(),
            archive_file_name: "campaign_rules.zip".into(),
            rules_cache_dir: "campaign/campaignRules".into(),
            rules_file_name: "rules.json".into(),
            message_cache_dir: "campaign/messages".into(),
            legacy_database: "ADBMobileCampaign.sqlite".into(),
            buffer_size: stagehand_fs::COPY_BUFFER_SIZE,
        }
    }
}

impl StagingConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> { Ok(toml::from_str(text)?) }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&text)
    }

    /// Extractor honouring the configured copy buffer size.
    pub fn extractor(&self) -> ArchiveExtractor {
        ArchiveExtractor::new(ExtractOptions::default().buffer_size(self.buffer_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(StagingConfig::from_toml_str("").unwrap(), StagingConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = StagingConfig::from_toml_str(
            r#"
            rules_file_name = "bundle.json"
            buffer_size = 8192
            "#,
        )
        .unwrap();
        assert_eq!(config.rules_file_name, "bundle.json");
        assert_eq!(config.buffer_size, 8192);
        assert_eq!(config.temp_dir, "campaign_temp");
    }

    #[test]
    fn extractor_uses_configured_buffer() {
        let config = StagingConfig::from_toml_str("buffer_size = 512").unwrap();
        assert_eq!(config.extractor().options().buffer_size, 512);

        let config = StagingConfig::from_toml_str("buffer_size = 0").unwrap();
        assert_eq!(config.extractor().options().buffer_size, 1);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = StagingConfig::from_toml_str("cache_everything = true");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = StagingConfig::load(dir.path().join("stagehand.toml"));
        assert!(matches!(result, Err(Error::ConfigRead { .. })));
    }
}
