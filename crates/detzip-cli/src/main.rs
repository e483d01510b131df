//! detzip CLI - Command-line utility for building reproducible ZIP archives.

mod cli;
mod create;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logging::init(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    create::execute(&cli, &*formatter)
}
