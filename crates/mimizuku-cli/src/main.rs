//! Classifier CLI main entry point

use anyhow::Result;
use clap::Parser;
use mimizuku_cli::commands::{execute, Cli};

fn main() -> Result<()> {
    // Logs go to stderr so JSON output can be piped from stdout.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    execute(cli.command)
}
