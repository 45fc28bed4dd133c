//! Command-line entry point.

#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Result;
use clap::Parser as _;
use gridsift::cli;
use gridsift::config::RunConfig;

fn main() -> Result<()> {
    gridsift::logging::init()?;

    let cli = cli::Cli::parse();
    let config = match &cli.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };

    cli::run_command(cli.command, &config)
}
