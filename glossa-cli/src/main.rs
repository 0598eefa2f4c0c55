//! Glossa command line tool

use clap::Parser;
use glossa_cli::Commands;

/// Locale-aware text segmentation and ICU message formatting
#[derive(Debug, Parser)]
#[command(name = "glossa", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_segment_command() {
        let cli = Cli::try_parse_from(["glossa", "segment", "--text", "Hi.", "-k", "sentence"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Segment(_)));
    }
}
