//! CLI command definitions
//!
//! Defines the clap commands for the smoke-test CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::harness::Format;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the built-in time-tracking API suite
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Only run the named scenario(s), in suite order
        /// Can be specified multiple times: --only Authentication --only "QR Code Scanning"
        #[arg(long)]
        only: Vec<String>,
    },

    /// Run a YAML test plan
    Plan {
        /// Path to the YAML test plan file
        path: PathBuf,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// List the built-in scenarios in execution order
    List,
}

/// Options shared by every command that talks to a server
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Base URL of the API under test (overrides SMOKE_BASE_URL and the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Connect timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Whole-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Configuration file (default: platform config dir)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
