//! Validate command implementation

use anyhow::Result;
use clap::Args;
use glossa_api::MessageFormat;
use std::path::PathBuf;

use crate::config::CliConfig;

/// Arguments for the validate command
#[derive(Debug, Args)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["config", "pattern"])))]
pub struct ValidateArgs {
    /// Path to a configuration file to validate
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Message pattern to compile
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Locale for the pattern
    #[arg(short, long, value_name = "LOCALE", default_value = "en")]
    pub locale: String,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        if let Some(path) = &self.config {
            self.validate_config(path)?;
        }
        if let Some(pattern) = &self.pattern {
            self.validate_pattern(pattern)?;
        }
        Ok(())
    }

    fn validate_config(&self, path: &std::path::Path) -> Result<()> {
        println!("Validating configuration: {}", path.display());

        match CliConfig::load(path).and_then(|config| config.validate().map(|_| config)) {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!(
                    "  Segmentation: {} ({})",
                    config.segmentation.kind, config.segmentation.locale
                );
                println!(
                    "  Messages: {} ({})",
                    config.message.locale, config.message.time_zone
                );
                println!("  Output format: {}", config.output.format);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {:#}", e))
            }
        }
    }

    fn validate_pattern(&self, pattern: &str) -> Result<()> {
        println!("Validating message pattern for {}", self.locale);

        match MessageFormat::new(pattern, &self.locale) {
            Ok(message) => {
                println!("✓ Pattern is valid!");
                let names = message.argument_names();
                if names.is_empty() {
                    println!("  Arguments: none");
                } else {
                    println!("  Arguments: {}", names.join(", "));
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Pattern is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
