//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use glossa_api::SegmentKind;

use crate::output::FormatKind;

pub mod format;
pub mod generate_config;
pub mod segment;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text into characters, words, lines or sentences
    Segment(segment::SegmentArgs),

    /// Format an ICU message pattern with arguments
    Format(format::FormatArgs),

    /// Validate a configuration file or a message pattern
    Validate(validate::ValidateArgs),

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List segment kinds
    Kinds,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Segment(args) => args.execute(),
            Commands::Format(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => {
                subcommand.execute();
                Ok(())
            }
        }
    }
}

impl ListCommands {
    fn execute(&self) {
        match self {
            ListCommands::Kinds => {
                println!("Segment kinds:");
                for kind in SegmentKind::all() {
                    println!("  {:<10} {}", kind.name(), kind_description(kind));
                }
            }
            ListCommands::Formats => {
                println!("Output formats:");
                for format in FormatKind::all() {
                    println!("  {:<10} {}", format.as_str(), format.description());
                }
            }
        }
    }
}

fn kind_description(kind: SegmentKind) -> &'static str {
    match kind {
        SegmentKind::Character => "User-perceived characters (grapheme clusters)",
        SegmentKind::Word => "Words, punctuation and whitespace runs",
        SegmentKind::Line => "Line break opportunities",
        SegmentKind::Sentence => "Sentences",
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Commands run more than once in tests share one process-wide logger
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
