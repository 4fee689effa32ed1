//! Smoke CLI - sequential HTTP API smoke tests
//!
//! Runs the built-in time-tracking suite or a YAML test plan against a
//! live server and exits 0 only if every test case passed.

use clap::Parser;
use commands::Commands;
use smoke::{cli, commands, common};

#[derive(Parser)]
#[command(name = "smoke", about = "Sequential HTTP API smoke tests")]
#[command(version, long_about = None)]
struct Cli {
    /// Enable debug logging (per-request details on stderr)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    common::logging::init_cli(cli.verbose);

    match cli::dispatch(cli.command).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
