//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::CliError;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            return Err(CliError::ConfigError(format!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            ))
            .into());
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, CliConfig::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to pick locales and segment kind");
        println!("2. Validate your configuration:");
        println!("   glossa validate --config {}", self.output.display());
        println!("3. Use it for segmentation:");
        println!(
            "   glossa segment -i input.txt --config {}",
            self.output.display()
        );

        Ok(())
    }
}
