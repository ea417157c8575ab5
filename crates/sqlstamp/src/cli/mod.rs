mod rename;

pub use rename::RenameCommand;

use anyhow::Result;
use clap::Parser;

/// sqlstamp - resequence timestamp-prefixed SQL migrations
#[derive(Parser)]
#[command(name = "sqlstamp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub rename: RenameCommand,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Execute the CLI command.
    pub fn execute(self) -> Result<()> {
        init_tracing(self.verbose);
        self.rename.execute()
    }
}

/// Log to stderr so stdout only carries progress lines.
fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
