//! stagehand - extracts and stages campaign rules bundles.

mod cli;

use std::fs::File;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use stagehand_bundle::{Reason, RulesStager, StagingConfig};
use stagehand_fs::FixedCacheDirectory;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose || std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(if cli.verbose {
                "stagehand=debug".parse()?
            } else {
                "stagehand=warn".parse()?
            }))
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match &cli.config {
        Some(path) => StagingConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => StagingConfig::default(),
    };

    let ok = match cli.command {
        Commands::Extract {
            archive,
            destination,
        } => {
            let ok = config.extractor().extract_file(&archive, &destination);
            if ok {
                println!("extracted {} into {}", archive.display(), destination.display());
            } else {
                eprintln!("failed to extract {}", archive.display());
            }
            ok
        }
        Commands::Stage {
            cache_dir,
            key,
            archive,
        } => {
            let stream = File::open(&archive)
                .with_context(|| format!("failed to open {}", archive.display()))?;
            let stager = RulesStager::new(FixedCacheDirectory::new(cache_dir), config);
            let result = stager.stage(&key, Some(stream));
            tracing::debug!(reason = ?result.reason, "staging finished");
            match (result.reason, result.data) {
                (Reason::Success, Some(rules)) => {
                    println!("{rules}");
                    true
                }
                (reason, _) => {
                    eprintln!("staging failed: {reason:?}");
                    false
                }
            }
        }
        Commands::Rm { recursive, path } => {
            let deleted = stagehand_fs::delete_path(&path, recursive)
                .with_context(|| format!("cannot delete {}", path.display()))?;
            println!("{}: {}", path.display(), if deleted { "deleted" } else { "not deleted" });
            deleted
        }
        Commands::Prune { cache_dir, urls } => {
            let stager = RulesStager::new(FixedCacheDirectory::new(cache_dir), config);
            let removed = stager.prune_message_assets(urls.as_slice())?;
            println!("removed {removed} cached asset(s)");
            true
        }
        Commands::DropLegacyDb { cache_dir } => {
            let stager = RulesStager::new(FixedCacheDirectory::new(cache_dir), config);
            let deleted = stager.delete_legacy_database();
            println!(
                "{}: {}",
                stager.config().legacy_database,
                if deleted { "deleted" } else { "not found" }
            );
            deleted
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
