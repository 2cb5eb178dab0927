use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, InputMode};

#[derive(Debug, Parser)]
#[command(name = "ceti-overlay", version, about = "Has the targeted star system been visited?")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read system names from the clipboard instead of the game journal
    #[arg(long)]
    pub clipboard: bool,

    /// Journal directory override
    #[arg(long)]
    pub journal_dir: Option<PathBuf>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if self.clipboard {
            config.mode = InputMode::Clipboard;
        }
        if let Some(dir) = &self.journal_dir {
            config.journal_dir = Some(dir.clone());
        }
        config
    }
}
