//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::error::LayoutError;
use crate::params::PageLayout;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "setlist")]
#[command(about = "Interactive piano landing page with a looping soundtrack", long_about = None)]
pub struct Args {
    /// Page layout file (TOML); the built-in page is used when omitted
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Background track (WAV)
    #[arg(long, value_name = "FILE", default_value = "assets/music/background.wav")]
    pub track: PathBuf,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Default log filter for env_logger
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Load the page layout selected on the command line
    pub fn load_layout(&self) -> Result<PageLayout, LayoutError> {
        PageLayout::load(self.layout.as_deref())
    }
}
