//! Command-line interface definition and parsing.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the exchange demo server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// The HMAC secret for verification of JWT claims.
    #[arg(short, long, env = "APP_SECRET")]
    pub secret: String,

    /// Seed the database with a demo neighborhood on first run.
    #[arg(long)]
    pub seed: bool,

    /// Write the OpenAPI document to this path and exit.
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
