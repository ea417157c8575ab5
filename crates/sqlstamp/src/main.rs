use anyhow::Result;
use clap::Parser;

use sqlstamp::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
