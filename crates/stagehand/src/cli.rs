use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stagehand")]
#[command(version)]
#[command(about = "Extracts and stages downloaded campaign rules bundles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (use RUST_LOG=trace for more detail)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file overriding staging directory and file names
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a zip archive into a directory
    Extract {
        archive: PathBuf,
        destination: PathBuf,
    },

    /// Stage a rules bundle into a cache directory and print the rules JSON
    Stage {
        #[arg(long)]
        cache_dir: PathBuf,

        /// Key the bundle was downloaded for, usually its URL
        #[arg(long)]
        key: String,

        archive: PathBuf,
    },

    /// Delete a file or, with -r, a directory tree
    Rm {
        #[arg(short, long)]
        recursive: bool,

        path: PathBuf,
    },

    /// Remove cached message assets not belonging to the given URLs
    Prune {
        #[arg(long)]
        cache_dir: PathBuf,

        urls: Vec<String>,
    },

    /// Delete the hit database left by the previous storage layout
    DropLegacyDb {
        #[arg(long)]
        cache_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_stage() {
        let cli = Cli::try_parse_from([
            "stagehand",
            "-v",
            "stage",
            "--cache-dir",
            "/tmp/cache",
            "--key",
            "https://example.com/rules.zip",
            "bundle.zip",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Stage { key, archive, .. } => {
                assert_eq!(key, "https://example.com/rules.zip");
                assert_eq!(archive, PathBuf::from("bundle.zip"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_recursive_rm() {
        let cli = Cli::try_parse_from(["stagehand", "rm", "-r", "/tmp/x"]).unwrap();
        assert!(matches!(cli.command, Commands::Rm { recursive: true, .. }));
    }
}
