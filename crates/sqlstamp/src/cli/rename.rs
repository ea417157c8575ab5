use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;
use tracing::debug;

use crate::{MigrationRenamer, RenameStep, StampConfig, DEFAULT_CONFIG_FILE};

/// Rename every migration in the configured directory.
#[derive(Args)]
pub struct RenameCommand {
    /// Configuration file path (defaults to sqlstamp.toml when present).
    #[arg(short, long)]
    pub config: Option<String>,

    /// Migrations directory path (overrides config).
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

impl RenameCommand {
    /// Resolve configuration from the config file and flags.
    pub fn load_config(&self) -> Result<StampConfig> {
        // Load .env if present
        dotenvy::dotenv().ok();

        let mut config = match &self.config {
            Some(path) => StampConfig::load(path, true)?,
            None => StampConfig::load(DEFAULT_CONFIG_FILE, false)?,
        };

        if let Some(dir) = &self.dir {
            config.renamer.dir = dir.clone();
        }

        Ok(config)
    }

    pub fn execute(self) -> Result<()> {
        let config = self.load_config()?;
        debug!("Using migrations directory {}", config.renamer.dir.display());

        let renamer = MigrationRenamer::new(config.renamer);

        println!();
        println!(
            "  {} Migrations in {}",
            style("sqlstamp").bold().cyan(),
            style(renamer.config().dir.display()).dim()
        );
        println!();

        let report = renamer.run(print_step).map_err(|e| {
            if !e.is_pre_mutation() {
                eprintln!(
                    "  {} Renaming stopped partway, {} may be partially renamed",
                    style("⚠").yellow(),
                    renamer.config().dir.display()
                );
            }
            e
        })?;

        if report.is_empty() {
            println!(
                "  {} No migrations found in {}",
                style("ℹ").blue(),
                renamer.config().dir.display()
            );
        }

        println!(
            "  {} All migration files have been renamed successfully!",
            style("✓").green()
        );
        println!();

        Ok(())
    }
}

fn print_step(step: &RenameStep) {
    println!(
        "  {} Renaming {} → {}",
        style("→").dim(),
        step.from.to_string_lossy(),
        style(step.to.to_string_lossy()).cyan()
    );
}
