// ABOUTME: Command line arguments for the taglet demo
// ABOUTME: Flags override the config file; verbosity maps onto the log level

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use taglet_logging::LoggingConfig;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    name = "taglet",
    version,
    about = "Type @ to mention workspace files and # to add tags"
)]
pub struct Cli {
    /// Config file (TOML)
    #[arg(short, long, value_name = "FILE", env = "TAGLET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory whose files are offered as @mentions
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Write logs here instead of the default location
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Level requested on the command line, if any
    pub fn log_level(&self) -> Option<Level> {
        match self.verbose {
            0 => None,
            1 => Some(Level::INFO),
            2 => Some(Level::DEBUG),
            _ => Some(Level::TRACE),
        }
    }

    /// Layer `-v` and `--log-file` over an already resolved logging config
    pub fn apply_logging(&self, config: LoggingConfig) -> LoggingConfig {
        config
            .with_verbosity(self.log_level())
            .with_file(self.log_file.clone())
    }
}
