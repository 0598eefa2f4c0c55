//! Format command implementation

use anyhow::{Context, Result};
use clap::Args;
use glossa_api::{arguments_from_json, parse_argument, Argument, MessageFormat};
use std::path::PathBuf;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::FileReader;

/// Arguments for the format command
#[derive(Debug, Args)]
pub struct FormatArgs {
    /// ICU message pattern, e.g. "{n, plural, one {# file} other {# files}}"
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: String,

    /// Locale tag, e.g. en_GB or de-DE
    #[arg(short, long, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Argument as name=value or name:type=value (int, float, decimal, bool, date, datetime, str)
    #[arg(short, long = "arg", value_name = "NAME=VALUE")]
    pub args: Vec<String>,

    /// JSON file with an object of arguments
    #[arg(long, value_name = "FILE")]
    pub args_json: Option<PathBuf>,

    /// Read date-times without an offset in the system time zone
    #[arg(long)]
    pub local_time: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl FormatArgs {
    /// Execute the format command
    pub fn execute(&self) -> Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }

    /// Compile the pattern and format it with the collected arguments
    pub fn render(&self) -> Result<String> {
        super::init_logging(self.verbose, false);

        let cli_config = CliConfig::load_or_default(self.config.as_deref())?;
        let config = cli_config.message_config(self.locale.as_deref(), self.local_time)?;
        let message = MessageFormat::with_config(&self.pattern, &config)
            .with_context(|| format!("Invalid message pattern: {}", self.pattern))?;

        let arguments = self.arguments()?;
        log::debug!(
            "formatting {} with {} argument(s)",
            message.pattern(),
            arguments.len()
        );

        message
            .format(arguments)
            .map_err(|err| CliError::ProcessingError(err.to_string()).into())
    }

    /// Arguments given with `--arg` come first so they win over the JSON file
    fn arguments(&self) -> Result<Vec<(String, Argument)>> {
        let mut arguments = self
            .args
            .iter()
            .map(|arg| {
                parse_argument(arg).map_err(|err| CliError::ArgumentError(err.to_string()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if let Some(path) = &self.args_json {
            let text = FileReader::read_text(path)?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse JSON arguments: {}", path.display()))?;
            arguments.extend(
                arguments_from_json(&value)
                    .map_err(|err| CliError::ArgumentError(err.to_string()))?,
            );
        }

        Ok(arguments)
    }
}
