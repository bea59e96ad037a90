use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigLayer;

#[derive(Parser, Debug)]
#[command(name = "aniname")]
#[command(author, version, about, long_about = None)]
#[command(about = "Rename anime episode files and season directories from naming templates")]
pub struct Args {
    /// Directory containing anime folders named <id> or <id>S<season>[P<part>]
    #[arg(required_unless_present = "restore")]
    pub target_dir: Option<PathBuf>,

    /// Simulate changes without modifying the filesystem
    #[arg(short, long)]
    pub dry: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Restore original names from a ledger file or a backup folder
    #[arg(short, long, value_name = "LEDGER_OR_DIR", conflicts_with = "target_dir")]
    pub restore: Option<PathBuf>,

    /// Metadata JSON file (defaults to <TARGET_DIR>/.aniname-metadata.json)
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Template for episode file names
    #[arg(long, value_name = "TEMPLATE")]
    pub episode_format: Option<String>,

    /// Template for season directory names
    #[arg(long, value_name = "TEMPLATE")]
    pub season_format: Option<String>,

    /// Configuration file (defaults to <config dir>/aniname/config.json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Settings given on the command line, the highest config layer
    pub fn config_overrides(&self) -> ConfigLayer {
        ConfigLayer {
            episode_format: self.episode_format.clone(),
            season_format: self.season_format.clone(),
            ..Default::default()
        }
    }
}
