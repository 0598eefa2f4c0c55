//! Command line front end for glossa
//!
//! `glossa segment` splits files or inline text into characters, words, line
//! break opportunities or sentences. `glossa format` renders an ICU message
//! pattern with typed arguments. Defaults for both come from a TOML file
//! (see [`CliConfig`]); `glossa generate-config` writes a starting point.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

// Re-export key types
pub use commands::Commands;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use output::{FormatKind, FormatOptions, OutputFormatter};
